//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use crate::{
    coroutine::{
        Coroutine,
        CoroutineExt as _,
        GeneratorState,
        Resumption,
    },
    error::Error,
    resumable::{
        Lifecycle,
        Resumable,
        SuspensionOutcome,
    },
    signal::FailureSignal,
};
