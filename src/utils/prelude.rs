pub(in crate)
use {
    ::core::{
        cell::RefCell,
        fmt,
        marker::PhantomData,
        ops::Not as _,
    },
    ::std::{
        rc::{Rc, Weak},
    },
    crate::{
        combinators::{
            FilterYield,
            Finally,
        },
        coroutine::{
            BoxedCoroutine,
            Coroutine,
            CoroutineExt as _,
            GeneratorState,
            Resumption,
        },
        delegation::{
            Chain,
            FlatMap,
        },
        error::{
            Error,
            Operation,
            Result,
        },
        resumable::{
            Lifecycle,
            Resumable,
            SuspensionOutcome,
        },
        signal::{
            FailureSignal,
        },
    },
};
