//! The computation under test: consecutive integers, optionally raising
//! at one pre-chosen index.

use_prelude!();

/// Yields `start, start + 1, …, end - 1`. If `fail_at` lies in the range,
/// the value at that index is never yielded: the body raises instead,
/// carrying the index as payload.
///
/// The guard built by the first statement is the body's persistent local
/// state, counted from the first poll until the frame lets go of it.
async
fn count_body (
    slot: YieldSlot<'_>,
    instr: Rc<Instrumentation>,
    start: i64,
    end: i64,
    fail_at: Option<i64>,
) -> Result<(), Failure>
{
    let _vars = CoroVars::new(&instr);
    for i in start .. end {
        if fail_at == Some(i) {
            return Err(Failure::at(i));
        }
        slot.put(i).await;
    }
    Ok(())
}

/// Builds a counting generator under the failure policy `P` and eagerly
/// runs it to its first suspension point.
///
/// # Errors
///
/// With `fail_at == Some(start)` the body raises before ever suspending,
/// so construction itself fails and no handle is produced.
///
/// # Example
///
/// ```rust
/// use ::eager_gen::prelude::*;
///
/// let instr = Instrumentation::new();
/// let failure =
///     count_range::<Deferred>(&instr, 0, 10, Some(0))
///         .map(drop)
///         .unwrap_err()
/// ;
/// assert_eq!(failure.payload(), "0");
/// ```
pub
fn count_range<P : FailPolicy> (
    instr: &'_ Rc<Instrumentation>,
    start: i64,
    end: i64,
    fail_at: Option<i64>,
) -> Result<Generator<impl Future<Output = Result<(), Failure>>, P>, Failure>
{
    let body_instr = Rc::clone(instr);
    Generator::spawn(
        instr,
        move |slot| count_body(slot, body_instr, start, end, fail_at),
    )
}
