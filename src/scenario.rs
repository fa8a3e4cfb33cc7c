//! The scenario protocol and the fixture wrapping it.

use_prelude!();

use ::core::fmt;

/// The outcome of one scenario: its ordered diagnostics and a verdict.
pub
struct Report {
    name: String,
    violations: Vec<String>,
    caveats: Vec<String>,
}

impl Report {
    /// The scenario's label.
    pub
    fn name (self: &'_ Self)
      -> &'_ str
    {
        &self.name
    }

    /// Protocol and lifecycle violations, in the order they were flagged.
    pub
    fn violations (self: &'_ Self)
      -> &'_ [String]
    {
        &self.violations
    }

    /// Observability caveats: reported, but never failed on.
    pub
    fn caveats (self: &'_ Self)
      -> &'_ [String]
    {
        &self.caveats
    }

    /// `true` iff the scenario flagged no violation.
    pub
    fn passed (self: &'_ Self)
      -> bool
    {
        self.violations.is_empty()
    }
}

/// The console form: the label, one indented line per diagnostic, and a
/// terminal `PASS` / `FAIL` marker.
impl fmt::Display for Report {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        writeln!(f, "{}:", self.name)?;
        for line in &self.violations {
            writeln!(f, "  {}", line)?;
        }
        for line in &self.caveats {
            writeln!(f, "  note: {}", line)?;
        }
        write!(f, "  {}", if self.passed() { "PASS" } else { "FAIL" })
    }
}

/// Runs one scenario inside a fresh instrumentation context, and settles
/// the instruments on the way out, panics included: lifecycle flags are
/// collected even when the scenario body itself blows up.
///
/// # Example
///
/// ```rust
/// use ::eager_gen::prelude::*;
///
/// let report = run_scenario("fails eagerly", |instr| {
///     drive::<Deferred>(instr, 0, 10, Some(0));
/// });
/// assert!(report.passed());
/// ```
pub
fn run_scenario (
    name: impl Into<String>,
    scenario: impl FnOnce(&'_ Rc<Instrumentation>),
) -> Report
{
    let instr = Instrumentation::new();
    ::unwind_safe::with_state(Rc::clone(&instr))
        .try_eval(|instr| scenario(instr))
        .finally(|instr| instr.settle());
    Report {
        name: name.into(),
        violations: instr.violations(),
        caveats: instr.caveats(),
    }
}

/// Drives a counting generator through the full advance protocol under
/// policy `P`, flagging every departure from the expectation.
///
/// `fail_at` outside `start .. end` means no failure at all. On a
/// mid-stream failure the expected timing is policy-dependent: a parking
/// policy delivers every value up to the failing index and raises on the
/// call after the last one, a direct policy raises on the call that
/// resumed into the failure, the value in flight discarded with it.
pub
fn drive<P : FailPolicy> (
    instr: &'_ Rc<Instrumentation>,
    start: i64,
    end: i64,
    fail_at: Option<i64>,
)
{
    let fail_at = fail_at.filter(|at| (start .. end).contains(at));
    let mut generator = match count_range::<P>(instr, start, end, fail_at) {
        | Ok(generator) => {
            if fail_at == Some(start) {
                instr.flag("expected an eager failure, got a handle");
                return;
            }
            generator
        },
        | Err(failure) => {
            match fail_at {
                | Some(at) if at == start => {
                    check_payload(instr, &failure, at);
                },
                | _ => instr.flag(format!(
                    "unexpected construction failure: {}", failure,
                )),
            }
            return;
        },
    };

    let delivered_up_to = match fail_at {
        | None => end,
        | Some(at) if P::PARKS_FAILURES => at,
        | Some(at) => at - 1,
    };
    for expected in start .. delivered_up_to {
        match generator.advance() {
            | Ok(Step::Value(value)) if value == expected => {},
            | Ok(step) => instr.flag(format!(
                "expected value {}, got {:?}", expected, step,
            )),
            | Err(failure) => instr.flag(format!(
                "expected value {}, got failure {}", expected, failure,
            )),
        }
    }
    if let Some(at) = fail_at {
        match generator.advance() {
            | Err(failure) => check_payload(instr, &failure, at),
            | Ok(step) => instr.flag(format!(
                "expected a failure, got {:?}", step,
            )),
        }
    }
    // the terminal state must hold, idempotently
    for _ in 0 .. 2 {
        match generator.advance() {
            | Ok(Step::Done) => {},
            | Ok(step) => instr.flag(format!(
                "expected Done, got {:?}", step,
            )),
            | Err(failure) => instr.flag(format!(
                "expected Done, got failure {}", failure,
            )),
        }
    }
}

fn check_payload (
    instr: &'_ Rc<Instrumentation>,
    failure: &'_ Failure,
    at: i64,
)
{
    if failure.payload() != at.to_string() {
        instr.flag(format!(
            "expected failure payload {:?}, got {:?}",
            at.to_string(),
            failure.payload(),
        ));
    }
}

/// Fixture plus driver in one call; the report is labeled with the
/// policy's name.
pub
fn counting_case<P : FailPolicy> (
    name: &'_ str,
    start: i64,
    end: i64,
    fail_at: Option<i64>,
) -> Report
{
    run_scenario(
        format!("{} ({})", name, P::NAME),
        |instr| drive::<P>(instr, start, end, fail_at),
    )
}
