//! `Context` plumbing for explicit polls.
//!
//! A suspended body is only ever resumed by an explicit poll from its
//! handle; nothing ever needs waking. The waker is thus pure vtable
//! ceremony around no-ops.

use ::core::task::{RawWaker, RawWakerVTable, Waker};

pub(in crate)
fn create ()
  -> Waker
{
    unsafe {
        // # Safety
        //
        //   - every entry of the vtable is a no-op, so there is no state
        //     behind the (null) data pointer to misuse.
        Waker::from_raw(RAW_WAKER)
    }
}

const RAW_WAKER: RawWaker = RawWaker::new(::core::ptr::null(), &VTABLE);

const VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);

unsafe // Safety: no-op function
fn clone (_: *const ())
  -> RawWaker
{
    RAW_WAKER
}

unsafe // Safety: no-op function
fn noop (_: *const ())
{}
