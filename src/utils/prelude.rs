pub(in crate)
use {
    ::core::{
        cell::Cell,
        future::Future,
        marker::PhantomData,
        pin::Pin,
        task::{
            Context,
            Poll,
        },
    },
    ::std::{
        cell::RefCell,
        rc::Rc,
    },
    crate::{
        body::count_range,
        failure::Failure,
        frame::{
            FrameBox,
            FrameHeader,
            FrameOwner,
            YieldSlot,
        },
        generator::{
            Generator,
            Step,
        },
        instrument::{
            CoroVars,
            Instrumentation,
        },
        policy::{
            Direct,
            FailAction,
            FailPolicy,
            Teardown,
        },
        utils::macros,
    },
};
