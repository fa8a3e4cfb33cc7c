//! End-to-end scenario runs: the full protocol, under both policies, with
//! the instruments audited after every one.

use ::eager_gen::prelude::*;

#[test]
fn full_drain_passes_under_both_policies ()
{
    let direct = counting_case::<Direct>("drains in order", 0, 10, None);
    assert!(direct.passed(), "{}", direct);
    let deferred = counting_case::<Deferred>("drains in order", 0, 10, None);
    assert!(deferred.passed(), "{}", deferred);
}

#[test]
fn eager_failure_passes_under_both_policies ()
{
    let direct = counting_case::<Direct>("fails eagerly", 0, 10, Some(0));
    assert!(direct.passed(), "{}", direct);
    let deferred = counting_case::<Deferred>("fails eagerly", 0, 10, Some(0));
    assert!(deferred.passed(), "{}", deferred);
}

#[test]
fn midstream_failure_passes_under_both_policies ()
{
    let direct = counting_case::<Direct>("fails midway", 0, 10, Some(5));
    assert!(direct.passed(), "{}", direct);
    let deferred = counting_case::<Deferred>("fails midway", 0, 10, Some(5));
    assert!(deferred.passed(), "{}", deferred);
}

#[test]
fn empty_range_passes ()
{
    let report = counting_case::<Direct>("empty range", 3, 3, None);
    assert!(report.passed(), "{}", report);
}

#[test]
fn out_of_range_fail_index_means_no_failure ()
{
    let report = counting_case::<Deferred>("failing index out of range", 0, 5, Some(17));
    assert!(report.passed(), "{}", report);
}

#[test]
fn scenarios_leave_no_residue_behind_each_other ()
{
    for _ in 0 .. 3 {
        let failing =
            counting_case::<Deferred>("fails midway", 0, 10, Some(5))
        ;
        assert!(failing.passed(), "{}", failing);
        let draining =
            counting_case::<Direct>("drains in order", 0, 10, None)
        ;
        assert!(draining.passed(), "{}", draining);
    }
}

#[test]
fn synthetic_violations_fail_the_report ()
{
    let report = run_scenario("synthetic", |instr| {
        instr.flag("synthetic protocol violation");
    });
    assert!(!report.passed());
    assert_eq!(report.violations(), &["synthetic protocol violation"][..]);
    // nothing was ever allocated, which is reported without failing on it
    assert_eq!(report.caveats().len(), 1);
}

#[test]
fn report_renders_the_console_form ()
{
    let passing = counting_case::<Direct>("drains in order", 0, 3, None);
    assert_eq!(passing.to_string(), "drains in order (direct):\n  PASS");

    let failing = run_scenario("broken", |instr| {
        instr.note_state_buf_alloc(0x40);
        instr.flag("synthetic protocol violation");
        instr.note_state_buf_free(0x40);
    });
    assert_eq!(
        failing.to_string(),
        "broken:\n  synthetic protocol violation\n  FAIL",
    );
}
