macro_rules! use_prelude {() => (
    use crate::utils::prelude::*;
)}

macro_rules! create_context {(
    $cx:ident
) => (
    let waker: ::core::task::Waker = crate::waker::create();
    let mut $cx = ::core::task::Context::from_waker(&waker);
)}
pub(in crate) use create_context;

macro_rules! abort_with_msg {( $($tt:tt)* ) => ({
    ::std::eprintln!($($tt)*);
    ::std::process::abort();
})}
pub(in crate) use abort_with_msg;
