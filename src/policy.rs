//! The two competing strategies for surfacing a body failure.
//!
//! Both must uphold the same contract: the frame is destroyed exactly
//! once over the generator's full lifetime, whichever failure path is
//! taken. The instrumentation exists to hold them to it.

use_prelude!();

/// What the core must do with a failure the body just raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
enum FailAction {
    /// Surface the failure to the current caller, discarding any value in
    /// flight.
    Raise,
    /// Park the failure in the frame and return the value in flight; the
    /// next call delivers the failure, before producing anything else.
    Park,
}

/// What handle teardown must do with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
enum Teardown {
    /// Run the body's destructor, then release the storage.
    Run,
    /// Release the storage only: the frame contents were already consumed
    /// where the failure surfaced.
    Skip,
}

/// A failure-handling strategy, selected per generator instance through
/// the handle's type parameter.
pub
trait FailPolicy {
    /// Label used in scenario reports.
    const NAME: &'static str;

    /// Whether a failure hit after a suspension is parked and delivered
    /// on the following call, rather than by the call that resumed into
    /// it.
    const PARKS_FAILURES: bool;

    /// Invoked at the moment the body raises. Decides how the failure is
    /// surfaced, and assigns the frame its teardown owner.
    fn on_fail (hdr: &'_ FrameHeader, has_suspended: bool)
      -> FailAction
    ;

    /// Invoked once, by the handle's teardown path.
    fn on_destroy (hdr: &'_ FrameHeader)
      -> Teardown
    ;
}

/// Re-raise at the point of failure, before or after the first
/// suspension.
///
/// In the pre-suspend case the caller holds no handle yet, so the raise
/// unwinds the failed construction itself, and the half-built handle
/// dropped along the way runs the one and only frame teardown. An eager
/// design re-raising at that point has to *trust* whatever drives the
/// unwinding to destroy the half-run frame exactly once; here the
/// ownership of the construction path makes that guarantee structural.
///
/// ```rust
/// use ::eager_gen::prelude::*;
///
/// let instr = Instrumentation::new();
/// let mut generator =
///     count_range::<Direct>(&instr, 0, 10, Some(2)).unwrap();
/// assert_eq!(generator.advance(), Ok(Step::Value(0)));
/// // the call that resumed into the failure raises it, discarding the
/// // value that was in flight
/// assert_eq!(generator.advance(), Err(Failure::at(2)));
/// assert_eq!(generator.advance(), Ok(Step::Done));
/// ```
pub
struct Direct;

impl FailPolicy for Direct {
    const NAME: &'static str = "direct";
    const PARKS_FAILURES: bool = false;

    fn on_fail (hdr: &'_ FrameHeader, _has_suspended: bool)
      -> FailAction
    {
        hdr.assign_owner(FrameOwner::Handle);
        FailAction::Raise
    }

    fn on_destroy (_hdr: &'_ FrameHeader)
      -> Teardown
    {
        Teardown::Run
    }
}

/// Track the first suspension; raise immediately only before it.
///
/// A failure *before* the first suspension hands the frame to the failing
/// path (`FrameOwner::Unwinder`): the raise site consumes the frame
/// contents, and the handle's teardown later releases storage only.
/// Observably, the caller sees exactly what [`Direct`] shows it.
///
/// A failure *after* the first suspension is not raised yet: it is parked
/// in the frame, the interrupted call returns its value normally, and the
/// very next [`advance`][`Generator::advance`] delivers the failure
/// before producing anything.
///
/// ```rust
/// use ::eager_gen::prelude::*;
///
/// let instr = Instrumentation::new();
/// let mut generator =
///     count_range::<Deferred>(&instr, 0, 10, Some(2)).unwrap();
/// assert_eq!(generator.advance(), Ok(Step::Value(0)));
/// assert_eq!(generator.advance(), Ok(Step::Value(1)));
/// // the failure was parked by the previous call; this one delivers it
/// assert_eq!(generator.advance(), Err(Failure::at(2)));
/// assert_eq!(generator.advance(), Ok(Step::Done));
/// ```
pub
struct Deferred;

impl FailPolicy for Deferred {
    const NAME: &'static str = "deferred";
    const PARKS_FAILURES: bool = true;

    fn on_fail (hdr: &'_ FrameHeader, has_suspended: bool)
      -> FailAction
    {
        if has_suspended {
            hdr.assign_owner(FrameOwner::Handle);
            FailAction::Park
        } else {
            hdr.assign_owner(FrameOwner::Unwinder);
            FailAction::Raise
        }
    }

    fn on_destroy (hdr: &'_ FrameHeader)
      -> Teardown
    {
        match hdr.owner() {
            | FrameOwner::Unwinder => Teardown::Skip,
            | FrameOwner::Undecided
            | FrameOwner::Handle => Teardown::Run,
        }
    }
}
