//! The shared instrumentation a scenario runs inside: the error log, the
//! single-slot state-buf tracker, and the live-vars counter.
//!
//! One [`Instrumentation`] is created per scenario and [settled][
//! `Instrumentation::settle`] at its end, so every scenario starts from a
//! clean baseline and leaves one behind. The trackers only *observe*: the
//! state buf is owned by the frame box reporting to them, and the counted
//! locals live inside the generator body.

use_prelude!();

/// Per-scenario instrumentation context.
///
/// Everything here is single-threaded interior mutability; the whole
/// system is cooperative and never crosses a thread.
pub
struct Instrumentation {
    log: RefCell<Vec<String>>,
    caveats: RefCell<Vec<String>>,
    state_buf: StateBufSlot,
    living_vars: Cell<i64>,
}

/// At most one tracked allocation at a time: the design assumes a single
/// active generator, and a second one showing up is exactly the kind of
/// violation worth flagging.
struct StateBufSlot {
    tracked: Cell<Option<usize>>,
    occupied: Cell<bool>,
    recorded_any: Cell<bool>,
}

impl Instrumentation {
    /// A fresh context: empty log, empty tracker slot, zero live vars.
    pub
    fn new ()
      -> Rc<Self>
    {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            caveats: RefCell::new(Vec::new()),
            state_buf: StateBufSlot {
                tracked: Cell::new(None),
                occupied: Cell::new(false),
                recorded_any: Cell::new(false),
            },
            living_vars: Cell::new(0),
        })
    }

    /// Appends a violation to the scenario's error log.
    pub
    fn flag (self: &'_ Self, message: impl Into<String>)
    {
        self.log.borrow_mut().push(message.into());
    }

    fn caveat (self: &'_ Self, message: impl Into<String>)
    {
        self.caveats.borrow_mut().push(message.into());
    }

    /// A state buf was just allocated at `addr`.
    pub
    fn note_state_buf_alloc (self: &'_ Self, addr: usize)
    {
        let slot = &self.state_buf;
        if slot.occupied.get() {
            // the allocation itself is not blocked, and the slot keeps
            // tracking the first address
            self.flag("double state buf allocation");
        } else {
            slot.tracked.set(Some(addr));
            slot.occupied.set(true);
            slot.recorded_any.set(true);
        }
    }

    /// The state buf at `addr` was just released.
    pub
    fn note_state_buf_free (self: &'_ Self, addr: usize)
    {
        let slot = &self.state_buf;
        if slot.tracked.get() != Some(addr) {
            self.flag("free unknown memory");
        } else if !slot.occupied.get() {
            self.flag("double free of state buf");
        }
        slot.occupied.set(false);
    }

    /// A generator body just constructed its persistent locals.
    pub
    fn note_vars_constructed (self: &'_ Self)
    {
        self.living_vars.set(self.living_vars.get() + 1);
    }

    /// A generator body's persistent locals were just destroyed.
    pub
    fn note_vars_destroyed (self: &'_ Self)
    {
        if self.living_vars.get() == 0 {
            self.flag("double destruction of coro vars");
        }
        // going negative is tolerated bookkeeping; it has been flagged
        self.living_vars.set(self.living_vars.get() - 1);
    }

    /// End-of-scenario audit: flags whatever is still outstanding, then
    /// restores the tracker and the counter to their clean baseline.
    ///
    /// Always runs to completion, so the next scenario starts clean no
    /// matter how this one went.
    pub
    fn settle (self: &'_ Self)
    {
        let slot = &self.state_buf;
        if slot.occupied.get() {
            self.flag("state buf leak");
        }
        if !slot.recorded_any.get() {
            self.caveat(
                "state buf allocation was elided (optimized out); \
                 test is unreliable",
            );
        }
        slot.tracked.set(None);
        slot.occupied.set(false);
        slot.recorded_any.set(false);
        if self.living_vars.get() != 0 {
            self.flag("coro vars not destroyed");
        }
        self.living_vars.set(0);
    }

    /// The violations flagged so far, in order.
    pub
    fn violations (self: &'_ Self)
      -> Vec<String>
    {
        self.log.borrow().clone()
    }

    /// The observability caveats noted so far; reported, never failed on.
    pub
    fn caveats (self: &'_ Self)
      -> Vec<String>
    {
        self.caveats.borrow().clone()
    }
}

/// RAII stand-in for the body's persistent locals.
///
/// Constructed as the body's first statement and dropped with the rest of
/// its locals, so the live-vars counter covers the span from first poll
/// to teardown.
pub
struct CoroVars {
    instr: Rc<Instrumentation>,
}

impl CoroVars {
    /// Registers one more living set of body locals.
    pub
    fn new (instr: &'_ Rc<Instrumentation>)
      -> Self
    {
        instr.note_vars_constructed();
        Self { instr: Rc::clone(instr) }
    }
}

impl Drop for CoroVars {
    fn drop (self: &'_ mut Self)
    {
        self.instr.note_vars_destroyed();
    }
}
