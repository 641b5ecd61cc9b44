//! Failure signals: the values injected into, or raised out of, a
//! computation body.

use ::std::{
    borrow::Cow,
    fmt,
    io,
};
use ::thiserror::Error;

use crate::error::Error as RuntimeError;

/// What kind of failure a [`FailureSignal`] carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub
enum SignalKind {
    /// The dedicated signal delivered by [`cancel()`][crate::Resumable::cancel].
    ///
    /// A body that observes it may re-raise it as-is, which ends the
    /// computation as `Cancelled` rather than `Failed`.
    Cancellation,

    /// A body yielded a value while it was being cancelled.
    IgnoredCancellation,

    /// Driving another computation failed, e.g. a pipeline stage pushed into
    /// a downstream stage that was not primed, or already closed.
    Runtime(Box<RuntimeError>),

    /// An application-level failure, identified by name (e.g. `"Reset"`).
    Named(Cow<'static, str>),
}

impl fmt::Display for SignalKind {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        match *self {
            | Self::Cancellation => f.write_str("Cancellation"),
            | Self::IgnoredCancellation => f.write_str("IgnoredCancellation"),
            | Self::Runtime(_) => f.write_str("RuntimeError"),
            | Self::Named(ref name) => f.write_str(name),
        }
    }
}

/// An error raised inside a computation body, or injected into it at its
/// suspension point through
/// [`.inject_failure()`][crate::Resumable::inject_failure].
///
/// When a cleanup block fails while a failure is already propagating, the
/// cleanup failure supersedes it and keeps the original one as its
/// [`context`][FailureSignal::context] (also reachable through
/// [`source()`][::std::error::Error::source]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub
struct FailureSignal {
    kind: SignalKind,
    message: String,
    #[source]
    context: Option<Box<FailureSignal>>,
}

impl FailureSignal {
    /// An application-level signal of the given `kind`.
    pub
    fn new (
        kind: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self
    {
        Self {
            kind: SignalKind::Named(kind.into()),
            message: message.into(),
            context: None,
        }
    }

    /// The signal delivered to a body when its computation is cancelled.
    pub
    fn cancellation ()
      -> Self
    {
        Self {
            kind: SignalKind::Cancellation,
            message: "computation cancelled".into(),
            context: None,
        }
    }

    pub(in crate)
    fn ignored_cancellation ()
      -> Self
    {
        Self {
            kind: SignalKind::IgnoredCancellation,
            message: "computation yielded a value instead of exiting".into(),
            context: None,
        }
    }

    /// Carry `err` across a body boundary, keeping it matchable through
    /// [`runtime_error()`][FailureSignal::runtime_error].
    pub(in crate)
    fn runtime (err: RuntimeError)
      -> Self
    {
        Self {
            message: err.to_string(),
            kind: SignalKind::Runtime(Box::new(err)),
            context: None,
        }
    }

    /// Attach `context` (usually the failure this one supersedes).
    pub
    fn with_context (self: Self, context: impl Into<Option<FailureSignal>>)
      -> Self
    {
        Self {
            context: context.into().map(Box::new),
            ..self
        }
    }

    /// What kind of failure this is.
    #[inline]
    pub
    fn kind (self: &'_ Self)
      -> &'_ SignalKind
    {
        &self.kind
    }

    /// The human-readable description.
    #[inline]
    pub
    fn message (self: &'_ Self)
      -> &'_ str
    {
        &self.message
    }

    /// The failure this signal superseded, if any.
    #[inline]
    pub
    fn context (self: &'_ Self)
      -> Option<&'_ FailureSignal>
    {
        self.context.as_deref()
    }

    /// Whether this is the cancellation signal (possibly re-raised by a body).
    #[inline]
    pub
    fn is_cancellation (self: &'_ Self)
      -> bool
    {
        self.kind == SignalKind::Cancellation
    }

    /// The runtime error this signal carries, for a
    /// [`SignalKind::Runtime`] signal.
    #[inline]
    pub
    fn runtime_error (self: &'_ Self)
      -> Option<&'_ RuntimeError>
    {
        match self.kind {
            | SignalKind::Runtime(ref err) => Some(err),
            | _ => None,
        }
    }

    /// Whether this is an application signal named `name`.
    pub
    fn is (self: &'_ Self, name: &'_ str)
      -> bool
    {
        matches!(self.kind, SignalKind::Named(ref it) if it == name)
    }
}

impl From<io::Error> for FailureSignal {
    fn from (err: io::Error)
      -> Self
    {
        Self::new("IoError", err.to_string())
    }
}
