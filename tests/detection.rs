//! The harness must *catch* lifecycle violations, not merely stay quiet
//! on correct runs. These scenarios misbehave on purpose.

use ::eager_gen::prelude::*;

/// A policy that never lets the handle run the frame's destructor.
///
/// Over a still-suspended generator this skips the destruction of live
/// body locals, which is exactly the defect class the live-vars counter
/// exists to expose.
struct Skipping;

impl FailPolicy for Skipping {
    const NAME: &'static str = "skipping";
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
        Teardown::Skip
    }
}

#[test]
fn a_skipping_policy_is_flagged_for_undestroyed_vars ()
{
    let report = run_scenario("skipping policy", |instr| {
        let mut generator =
            count_range::<Skipping>(instr, 0, 10, None).unwrap()
        ;
        assert_eq!(generator.advance(), Ok(Step::Value(0)));
    });
    assert!(!report.passed());
    assert_eq!(report.violations(), &["coro vars not destroyed"][..]);
}

#[test]
fn overlapping_generators_are_flagged_by_the_tracker ()
{
    let report = run_scenario("overlapping generators", |instr| {
        let mut first =
            count_range::<Direct>(instr, 0, 5, None).unwrap()
        ;
        let mut second =
            count_range::<Direct>(instr, 10, 15, None).unwrap()
        ;
        assert_eq!(first.advance(), Ok(Step::Value(0)));
        assert_eq!(second.advance(), Ok(Step::Value(10)));
        drop(second);
        drop(first);
    });
    assert!(!report.passed());
    assert_eq!(
        report.violations(),
        &[
            // the second frame shows up while the first is still tracked
            "double state buf allocation",
            // its release is a free of an address the tracker never kept
            "free unknown memory",
            // which in turn emptied the slot, so the first frame's
            // legitimate release reads as a second one
            "double free of state buf",
        ][..],
    );
}
