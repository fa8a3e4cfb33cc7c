//! Lifecycle-verified eagerly-started generators.
//!
//! A generator here starts *eagerly*: its body runs to the first
//! suspension point inside construction itself, before the caller ever
//! holds a handle. A body may also raise before that first suspension, at
//! which point "who owns the half-run frame" becomes a real question, and
//! answering it wrong destroys the frame twice, or never. This crate
//! builds the state machine, the two competing failure-handling policies
//! ([`Direct`] and [`Deferred`]), and the instrumentation that turns any
//! lifecycle violation into an observable test failure.
//!
//! # Example
//!
//! ```rust
//! use ::eager_gen::prelude::*;
//!
//! let report = counting_case::<Deferred>("drains in order", 0, 3, None);
//! assert!(report.passed());
//! ```

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]

#[macro_use]
mod utils;

mod body;

mod failure;

mod frame;

mod generator;

mod instrument;

mod policy;

mod scenario;

mod waker;

pub
mod prelude;

pub use self::{
    body::count_range,
    failure::Failure,
    frame::{FrameHeader, FrameOwner, YieldSlot},
    generator::{Generator, Step},
    instrument::{CoroVars, Instrumentation},
    policy::{Deferred, Direct, FailAction, FailPolicy, Teardown},
    scenario::{counting_case, drive, run_scenario, Report},
};
