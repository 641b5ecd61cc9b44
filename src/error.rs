//! The crate-wide error type.

use ::std::fmt;
use ::thiserror::Error;

use crate::{
    resumable::Lifecycle,
    signal::FailureSignal,
};

/// Alias with [`Error`] as the default error type.
pub
type Result<T, E = Error> = ::core::result::Result<T, E>;

/// The operation that was refused, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub
enum Operation {
    /// [`Resumable::start`][crate::Resumable::start]
    Start,
    /// [`Resumable::resume`][crate::Resumable::resume]
    Resume,
    /// [`Resumable::inject_failure`][crate::Resumable::inject_failure]
    InjectFailure,
    /// [`Resumable::cancel`][crate::Resumable::cancel]
    Cancel,
    /// Pushing into a pipeline stage.
    Push,
    /// Closing a pipeline stage.
    CloseChain,
}

impl fmt::Display for Operation {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f.write_str(match *self {
            | Self::Start => "start",
            | Self::Resume => "resume",
            | Self::InjectFailure => "inject a failure into",
            | Self::Cancel => "cancel",
            | Self::Push => "push into",
            | Self::CloseChain => "close",
        })
    }
}

/// Everything that can go wrong when driving a [`Resumable`][crate::Resumable].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub
enum Error {
    /// The operation is forbidden from the computation's current state,
    /// e.g. resuming (or pushing into) a computation that was never started.
    #[error("cannot {operation} a computation that is {state}")]
    InvalidState {
        /// What was attempted.
        operation: Operation,
        /// The state it was refused in.
        state: Lifecycle,
    },

    /// The computation already reached a terminal state. Stop driving it, or
    /// create a fresh instance.
    #[error("cannot {operation} an exhausted computation ({state})")]
    Exhausted {
        /// What was attempted.
        operation: Operation,
        /// The terminal state the computation ended in (`Cancelled` for a
        /// pipeline stage that no longer exists).
        state: Lifecycle,
    },

    /// The computation is already being driven by someone else.
    #[error("cannot {operation} a computation that is already running")]
    ConcurrentAccess {
        /// What was attempted.
        operation: Operation,
    },

    /// A failure signal propagated out of the body (or out of its cleanup).
    #[error(transparent)]
    Failure(#[from] FailureSignal),
}

impl Error {
    /// Whether this is an [`Error::Exhausted`], possibly raised out of a body
    /// that was driving another computation.
    pub
    fn is_exhausted (self: &'_ Self)
      -> bool
    {
        match self.root() {
            | Self::Exhausted { .. } => true,
            | _ => false,
        }
    }

    /// Whether this is an [`Error::InvalidState`], possibly raised out of a
    /// body that was driving another computation.
    pub
    fn is_invalid_state (self: &'_ Self)
      -> bool
    {
        match self.root() {
            | Self::InvalidState { .. } => true,
            | _ => false,
        }
    }

    /// Look through [`SignalKind::Runtime`][crate::SignalKind::Runtime]
    /// failures down to the error that started them.
    pub
    fn root (self: &'_ Self)
      -> &'_ Self
    {
        let mut err = self;
        while let Self::Failure(signal) = err {
            match signal.runtime_error() {
                | Some(inner) => err = inner,
                | None => break,
            }
        }
        err
    }
}

/// So that a body can raise whatever went wrong while it drove another
/// computation.
impl From<Error> for FailureSignal {
    fn from (err: Error)
      -> Self
    {
        match err {
            | Error::Failure(signal) => signal,
            | other => FailureSignal::runtime(other),
        }
    }
}
