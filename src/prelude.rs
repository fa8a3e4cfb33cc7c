//! Bulk-import surface: `use ::eager_gen::prelude::*;`

#[doc(no_inline)]
pub use crate::{
    count_range,
    counting_case,
    drive,
    run_scenario,
    CoroVars,
    Deferred,
    Direct,
    FailAction,
    FailPolicy,
    Failure,
    FrameHeader,
    FrameOwner,
    Generator,
    Instrumentation,
    Report,
    Step,
    Teardown,
    YieldSlot,
};
