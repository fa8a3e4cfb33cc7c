//! The generator handle and its lifecycle state machine.

use_prelude!();

/// What one call to [`Generator::advance`] produced.
///
/// The two sentinels are structurally distinct from every real value, and
/// from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
enum Step {
    /// The handle is empty: it never had a frame, or already let go of
    /// it.
    NoHandle,
    /// The generator already reached a terminal state.
    Done,
    /// The next value of the sequence.
    Value(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Suspended,
    Completed,
    Failed,
}

/// A handle to an eagerly-started generator.
///
/// By the time a caller holds one, the body has already run: construction
/// itself performs the first resume, up to the first suspension point or
/// to completion. A body that raises before ever suspending fails the
/// construction instead, so no handle exists for that run at all; what
/// that means for the ownership of the frame is the active
/// [`FailPolicy`]'s call.
///
/// # Example
///
/// ```rust
/// use ::eager_gen::prelude::*;
///
/// let instr = Instrumentation::new();
/// let mut generator =
///     count_range::<Direct>(&instr, 0, 3, None)
///         .expect("no failing index in this range")
/// ;
/// assert_eq!(generator.advance(), Ok(Step::Value(0)));
/// assert_eq!(generator.advance(), Ok(Step::Value(1)));
/// assert_eq!(generator.advance(), Ok(Step::Value(2)));
/// assert_eq!(generator.advance(), Ok(Step::Done));
/// ```
pub
struct Generator<F, P = Direct>
where
    F : Future<Output = Result<(), Failure>>,
    P : FailPolicy,
{
    frame: Option<FrameBox<F>>,
    phase: Phase,
    _policy: PhantomData<P>,
}

impl<F, P> Generator<F, P>
where
    F : Future<Output = Result<(), Failure>>,
    P : FailPolicy,
{
    /// An empty handle: no frame, nothing to resume.
    pub
    fn empty ()
      -> Self
    {
        Self {
            frame: None,
            phase: Phase::Completed,
            _policy: PhantomData,
        }
    }

    /// Builds a frame around the body produced by `factory`, and eagerly
    /// runs it to its first suspension point.
    ///
    /// # Errors
    ///
    /// A body that raises before ever suspending fails the construction:
    /// the failure propagates out of this very call, the frame is torn
    /// down exactly once along the way, and the caller receives no
    /// handle.
    pub
    fn spawn<'frame> (
        instr: &'_ Rc<Instrumentation>,
        factory: impl FnOnce(YieldSlot<'frame>) -> F,
    ) -> Result<Self, Failure>
    {
        let mut this = Self {
            frame: Some(FrameBox::new(instr, factory)),
            phase: Phase::Suspended,
            _policy: PhantomData,
        };
        // eager start: the caller only ever sees a suspended or completed
        // generator, or no generator at all
        let polled = {
            let frame = this.frame.as_mut().expect("freshly built frame");
            let polled = frame.poll_body();
            if let Poll::Pending = polled {
                frame.hdr().note_suspended();
            }
            polled
        };
        match polled {
            | Poll::Pending => Ok(this),
            | Poll::Ready(Ok(())) => {
                this.phase = Phase::Completed;
                Ok(this)
            },
            | Poll::Ready(Err(failure)) => {
                let hdr = this.frame.as_ref().expect("freshly built frame").hdr();
                // whatever action the policy picks, a failure with no
                // prior suspension can only surface here: there is no
                // later call to deliver a parked failure on
                let _ = P::on_fail(hdr, hdr.has_suspended());
                Err(failure)
            },
        }
    }

    /// Advances the generator one step.
    ///
    /// Returns the value parked at the current suspension point, after
    /// resuming the body up to its next one. A failure hit during that
    /// resume is surfaced per the active [`FailPolicy`]: either by this
    /// very call, discarding the value in flight, or parked and delivered
    /// by the next one.
    ///
    /// # Errors
    ///
    /// The body's own [`Failure`], with the timing above. Sentinels are
    /// never errors: an empty handle yields [`Step::NoHandle`] and a
    /// terminal generator yields [`Step::Done`], idempotently.
    pub
    fn advance (self: &'_ mut Self)
      -> Result<Step, Failure>
    {
        let frame = match self.frame.as_mut() {
            | Some(frame) => frame,
            | None => return Ok(Step::NoHandle),
        };
        match self.phase {
            | Phase::Completed
            | Phase::Failed => match frame.hdr().take_parked() {
                | Some(failure) => Err(failure),
                | None => Ok(Step::Done),
            },
            | Phase::Suspended => {
                let value =
                    frame.hdr()
                        .take_value()
                        .expect("Missing item in the yield slot!")
                ;
                match frame.poll_body() {
                    | Poll::Pending => Ok(Step::Value(value)),
                    | Poll::Ready(Ok(())) => {
                        self.phase = Phase::Completed;
                        Ok(Step::Value(value))
                    },
                    | Poll::Ready(Err(failure)) => {
                        self.phase = Phase::Failed;
                        let hdr = frame.hdr();
                        match P::on_fail(hdr, hdr.has_suspended()) {
                            | FailAction::Raise => Err(failure),
                            | FailAction::Park => {
                                hdr.park(failure);
                                Ok(Step::Value(value))
                            },
                        }
                    },
                }
            },
        }
    }

    /// Empties the handle now, tearing the frame down per the active
    /// policy, as if the generator had been dropped. Subsequent calls to
    /// [`Generator::advance`] report [`Step::NoHandle`].
    pub
    fn release (self: &'_ mut Self)
    {
        if let Some(mut frame) = self.frame.take() {
            if let Teardown::Skip = P::on_destroy(frame.hdr()) {
                frame.forgo_body();
            }
            // dropping the box releases the tracked storage
        }
    }
}

impl<F, P> Drop for Generator<F, P>
where
    F : Future<Output = Result<(), Failure>>,
    P : FailPolicy,
{
    fn drop (self: &'_ mut Self)
    {
        self.release();
    }
}
