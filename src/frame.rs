//! The generator's persistent state block, and the slot it yields
//! through.
//!
//! A [`FrameBox`] is the "state buf": one raw heap allocation holding the
//! body future next to its header, reported to the state-buf tracker at
//! both ends of its life. The storage is *always* on the heap, precisely
//! so that the allocation under observation can never be optimized away.

use_prelude!();

use ::core::{
    alloc::Layout,
    ptr::NonNull,
};

/// The single-item channel between a suspended body and its handle.
///
/// An empty `value` doubles as the "not yet produced" sentinel.
pub(in crate)
struct ItemSlot {
    value: Cell<Option<i64>>,
    retired: Cell<bool>,
}

/// The handle a body yields through.
///
/// Obtained from the factory given to [`Generator::spawn`]; the body is
/// expected to keep it among its locals for its whole run, and to let it
/// drop with them. A `YieldSlot` smuggled out of its body is caught when
/// the frame is torn down, and aborts the process rather than let the
/// reference dangle.
pub
struct YieldSlot<'frame> {
    slot: &'frame ItemSlot,
}

impl Drop for YieldSlot<'_> {
    fn drop (self: &'_ mut Self)
    {
        self.slot.retired.set(true);
    }
}

impl<'frame> YieldSlot<'frame> {
    fn new (slot: &'frame ItemSlot)
      -> Self
    {
        Self { slot }
    }

    /// Parks `value` for the handle and suspends until it has been taken.
    pub
    fn put (self: &'_ Self, value: i64)
      -> impl Future<Output = ()> + '_
    {
        let prev = self.slot.value.replace(Some(value));
        debug_assert!(prev.is_none(), "slot was empty");
        return WaitForClear { slot: self.slot };

        /// The suspension point itself:
        ///
        ///  1. polled right after the slot was filled (lines above), it
        ///     reports `Pending`, handing control back to the polling side
        ///     with the value waiting in the slot;
        ///
        ///  2. polled again once the slot has been emptied, it completes,
        ///     and the body runs on to its next yield or to its end.
        struct WaitForClear<'frame> {
            slot: &'frame ItemSlot,
        }

        impl Future for WaitForClear<'_> {
            type Output = ();

            fn poll (self: Pin<&'_ mut Self>, _: &'_ mut Context<'_>)
              -> Poll<()>
            {
                if self.slot.value.get().is_some() {
                    Poll::Pending
                } else {
                    Poll::Ready(())
                }
            }
        }
    }
}

/// Who owes the frame its teardown.
///
/// Assigned by the active [`FailPolicy`] at the moment a failure
/// surfaces, and consulted exactly once, by the single teardown path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
enum FrameOwner {
    /// No failure so far; the handle will tear the frame down normally.
    Undecided,
    /// The handle keeps ownership despite a failure.
    Handle,
    /// The failing path consumed the frame contents where the failure
    /// surfaced; the handle must only release the storage.
    Unwinder,
}

/// Policy bookkeeping living inside the frame allocation, next to the
/// body.
pub
struct FrameHeader {
    slot: ItemSlot,
    has_suspended: Cell<bool>,
    owner: Cell<FrameOwner>,
    parked: Cell<Option<Failure>>,
}

impl FrameHeader {
    pub(in crate)
    fn new ()
      -> Self
    {
        Self {
            slot: ItemSlot {
                value: Cell::new(None),
                retired: Cell::new(false),
            },
            has_suspended: Cell::new(false),
            owner: Cell::new(FrameOwner::Undecided),
            parked: Cell::new(None),
        }
    }

    /// Whether the body has reached at least one suspension point.
    pub
    fn has_suspended (self: &'_ Self)
      -> bool
    {
        self.has_suspended.get()
    }

    pub(in crate)
    fn note_suspended (self: &'_ Self)
    {
        self.has_suspended.set(true);
    }

    /// The current teardown assignment.
    pub
    fn owner (self: &'_ Self)
      -> FrameOwner
    {
        self.owner.get()
    }

    /// Reassigns teardown of the frame; policies call this from
    /// [`on_fail`][`FailPolicy::on_fail`].
    pub
    fn assign_owner (self: &'_ Self, owner: FrameOwner)
    {
        self.owner.set(owner);
    }

    pub(in crate)
    fn park (self: &'_ Self, failure: Failure)
    {
        self.parked.set(Some(failure));
    }

    pub(in crate)
    fn take_parked (self: &'_ Self)
      -> Option<Failure>
    {
        self.parked.take()
    }

    pub(in crate)
    fn take_value (self: &'_ Self)
      -> Option<i64>
    {
        self.slot.value.take()
    }
}

struct Frame<F : Future> {
    hdr: FrameHeader,
    body: Option<F>,
}

/// Owning pointer to the tracked frame allocation.
///
/// Its `Drop` is the storage-release path; whether the body's destructor
/// runs first is decided by the handle (per the active policy's
/// [`on_destroy`][`FailPolicy::on_destroy`]) through
/// [`FrameBox::forgo_body`].
pub(in crate)
struct FrameBox<F : Future> {
    ptr: NonNull<Frame<F>>,
    instr: Rc<Instrumentation>,
    run_dtor: bool,
}

impl<F : Future> FrameBox<F> {
    pub(in crate)
    fn new<'frame> (
        instr: &'_ Rc<Instrumentation>,
        factory: impl FnOnce(YieldSlot<'frame>) -> F,
    ) -> Self
    {
        let layout = Layout::new::<Frame<F>>();
        let ptr =
            NonNull::new(
                unsafe { ::std::alloc::alloc(layout) }.cast::<Frame<F>>()
            )
            .unwrap_or_else(|| ::std::alloc::handle_alloc_error(layout))
        ;
        instr.note_state_buf_alloc(ptr.as_ptr() as usize);
        unsafe {
            ptr.as_ptr().write(Frame {
                hdr: FrameHeader::new(),
                body: None,
            });
        }
        let yield_slot = YieldSlot::new(unsafe {
            // # Safety
            //
            //   - the item slot sits at a stable heap address from here
            //     until the storage is released, which only happens once
            //     the body (and the `YieldSlot` among its locals) is gone;
            //
            //   - a `YieldSlot` escaping its body is caught at teardown:
            //     the slot's retire flag is still unset at that point, and
            //     the process aborts before the reference can dangle.
            ::core::mem::transmute::<&'_ ItemSlot, &'frame ItemSlot>(
                &(*ptr.as_ptr()).hdr.slot,
            )
        });
        let body = factory(yield_slot);
        unsafe {
            (*ptr.as_ptr()).body = Some(body);
        }
        Self {
            ptr,
            instr: Rc::clone(instr),
            run_dtor: true,
        }
    }

    pub(in crate)
    fn hdr (self: &'_ Self)
      -> &'_ FrameHeader
    {
        unsafe {
            // # Safety
            //
            //   - the allocation is live for as long as `self` is.
            &self.ptr.as_ref().hdr
        }
    }

    /// Runs the body one step, to its next suspension point or to its
    /// end.
    pub(in crate)
    fn poll_body (self: &'_ mut Self)
      -> Poll<F::Output>
    {
        macros::create_context!(cx);
        unsafe {
            // # Safety
            //
            //   - the body never leaves its heap cell once written, which
            //     is all `Pin` asks of it.
            let body =
                (*self.ptr.as_ptr())
                    .body
                    .as_mut()
                    .expect("Missing body in the frame!")
            ;
            Pin::new_unchecked(body).poll(&mut cx)
        }
    }

    /// Storage-only release: teardown will skip the body's destructor.
    ///
    /// Reserved for frames whose contents the failing path already
    /// consumed; on a frame whose body still holds live locals, those
    /// locals are never destroyed, which is exactly what the live-vars
    /// counter is there to catch.
    pub(in crate)
    fn forgo_body (self: &'_ mut Self)
    {
        self.run_dtor = false;
    }
}

impl<F : Future> Drop for FrameBox<F> {
    fn drop (self: &'_ mut Self)
    {
        let ptr = self.ptr.as_ptr();
        let run_dtor = self.run_dtor;
        let instr = Rc::clone(&self.instr);
        ::unwind_safe::with_state(())
            .try_eval(move |&mut ()| if run_dtor {
                unsafe {
                    // drop the body *in place*; its locals, the yield
                    // slot among them, go with it
                    (*ptr).body = None;
                }
                if unsafe { !(*ptr).hdr.slot.retired.get() } {
                    macros::abort_with_msg!("\
                        `eager-gen` fatal runtime error: \
                        a `YieldSlot` was about to dangle!\
                        \n\
                        \n\
                        This is only possible if a yield slot was moved \
                        out of the body it was issued to. \
                        Since this could lead to memory unsafety, \
                        the program will now abort.\
                    ");
                }
            })
            .finally(move |()| {
                instr.note_state_buf_free(ptr as usize);
                unsafe {
                    ::std::alloc::dealloc(
                        ptr.cast(),
                        Layout::new::<Frame<F>>(),
                    );
                }
            })
    }
}
