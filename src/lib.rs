//! Resumable computations: sequential processes that pause at explicit
//! suspension points, and can be resumed with an injected value, interrupted
//! with an injected failure, or cancelled with guaranteed cleanup; plus the
//! means to compose them, by delegation (pull) or into push pipelines.
//!
//! ```rust
//! use ::resumable::prelude::*;
//! use ::resumable::sequences::PalindromeSearch;
//!
//! let mut search = PalindromeSearch::new().into_resumable();
//! assert_eq!(
//!     search.by_ref().take(5).collect::<Vec<_>>(),
//!     [11, 22, 33, 44, 55],
//! );
//! // Jump ahead.
//! assert_eq!(search.resume(Some(100)), Ok(SuspensionOutcome::Produced(101)));
//! search.cancel().unwrap();
//! assert!(search.resume(None).unwrap_err().is_exhausted());
//! ```
//!
//! The pieces:
//!
//!   - a [`Coroutine`] is the _body_ of a computation: an explicit state
//!     machine stepped with a [`Resumption`];
//!
//!   - a [`Resumable`] drives a body through its [`Lifecycle`] and owns the
//!     exactly-once cleanup guarantee;
//!
//!   - [`delegation`] forwards a computation's resumptions into a nested one,
//!     flattening sequences of sequences;
//!
//!   - [`pipeline`] wires computations into producer → stage → sink chains.

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::needless_arbitrary_self_type,
)]
#![doc(test(attr(deny(warnings))))]

#[macro_use]
mod utils;

#[path = "public_prelude.rs"]
pub
mod prelude;

pub use self::{
    coroutine::{BoxedCoroutine, Coroutine, CoroutineExt, GeneratorState, Resumption},
    error::{Error, Operation, Result},
    resumable::{Lifecycle, Resumable, SuspensionOutcome},
    signal::{FailureSignal, SignalKind},
};

pub mod coroutine;

mod error;

mod iter;

pub mod resumable;

mod signal;

pub mod combinators;

pub mod delegation;

pub mod pipeline;

pub mod sequences;

pub mod sources;

#[cfg(test)]
mod tests;
