//! The generator body's own error: the index it refused to yield.

use ::thiserror::Error;

/// Raised by a generator body when it reaches its pre-chosen failing
/// index.
///
/// The index is the error payload: [`Failure::payload`] is its decimal
/// text form, which is what the scenario protocol compares, character for
/// character. The [`Display`][`::core::fmt::Display`] form only adds
/// human context around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("body raised at index {index}")]
pub
struct Failure {
    index: i64,
}

impl Failure {
    /// A failure carrying `index` as its payload.
    pub
    fn at (index: i64)
      -> Self
    {
        Self { index }
    }

    /// The failing index.
    pub
    fn index (self: &'_ Self)
      -> i64
    {
        self.index
    }

    /// The payload in its canonical decimal text form.
    pub
    fn payload (self: &'_ Self)
      -> String
    {
        self.index.to_string()
    }
}
