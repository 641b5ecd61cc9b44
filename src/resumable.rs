//! The runtime side of a resumable computation: lifecycle enforcement,
//! failure propagation, and the exactly-once cleanup guarantee.

use_prelude!();

/// Where a [`Resumable`] computation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub
enum Lifecycle {
    /// Built, never started.
    Created,
    /// Paused at a suspension point, waiting for a resume, an injection, or a
    /// cancellation.
    Suspended,
    /// Its body is executing right now.
    Running,
    /// The body returned.
    Completed,
    /// The computation was cancelled (or its body re-raised the cancellation
    /// signal).
    Cancelled,
    /// A failure signal escaped the body, or its cleanup failed.
    Failed,
}

impl Lifecycle {
    /// `Completed`, `Cancelled` or `Failed`.
    #[inline]
    pub
    fn is_terminal (self: Self)
      -> bool
    {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f.write_str(match *self {
            | Self::Created => "created",
            | Self::Suspended => "suspended",
            | Self::Running => "running",
            | Self::Completed => "completed",
            | Self::Cancelled => "cancelled",
            | Self::Failed => "failed",
        })
    }
}

/// What a [`start`][`Resumable::start`] / [`resume`][`Resumable::resume`] /
/// [`inject_failure`][`Resumable::inject_failure`] call ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub
enum SuspensionOutcome<Yield, Return = ()> {
    /// The computation paused with a value.
    Produced(Yield),
    /// The computation ran to its end.
    Completed(Return),
    /// A failure signal escaped the computation (which is now `Failed`), or
    /// the body cancelled itself (then the signal
    /// [is a cancellation][`FailureSignal::is_cancellation`] and the
    /// computation is `Cancelled`).
    Failed(FailureSignal),
}

impl<Yield, Return> SuspensionOutcome<Yield, Return> {
    /// The produced value, if any.
    #[inline]
    pub
    fn produced (self: Self)
      -> Option<Yield>
    {
        match self {
            | Self::Produced(value) => Some(value),
            | _ => None,
        }
    }
}

/// A resumable computation: a [`Coroutine`] body plus the state machine that
/// drives it.
///
/// ```text
///            start()                  resume() / inject_failure()
///  Created ──────────► Running ◄─────────────────────────────┐
///     │                  │  │ yields                          │
///     │ cancel()         │  └──────────────► Suspended ───────┘
///     │                  │ returns / raises     │ cancel()
///     ▼                  ▼                      ▼
///  Cancelled    Completed | Failed | Cancelled (cleanup has run, once)
/// ```
///
/// The body (its position and its locals) is owned by the `Resumable` and is
/// only ever reached through the four driving operations, so there is at
/// most one active resumption at any time, and cleanup is tied to the
/// terminal transition rather than to the caller's discipline.
///
/// Dropping a computation that has not reached a terminal state cancels it.
pub
struct Resumable<C : Coroutine> {
    body: C,
    lifecycle: Lifecycle,
    cleaned_up: bool,
    produced: usize,
    failure: Option<FailureSignal>,
}

impl<C : Coroutine> fmt::Debug for Resumable<C> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Resumable")
            .field("lifecycle", &self.lifecycle)
            .field("produced", &self.produced)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl<C : Coroutine> Resumable<C> {
    /// A `Created` computation over `body`.
    pub
    fn new (body: C)
      -> Self
    {
        Self {
            body,
            lifecycle: Lifecycle::Created,
            cleaned_up: false,
            produced: 0,
            failure: None,
        }
    }

    /// Where the computation stands.
    #[inline]
    pub
    fn lifecycle (self: &'_ Self)
      -> Lifecycle
    {
        self.lifecycle
    }

    /// Whether the computation has ended (and cleaned up).
    #[inline]
    pub
    fn is_terminal (self: &'_ Self)
      -> bool
    {
        self.lifecycle.is_terminal()
    }

    /// How many values this computation has produced so far.
    #[inline]
    pub
    fn produced_count (self: &'_ Self)
      -> usize
    {
        self.produced
    }

    /// The failure that ended this computation, if it ended `Failed`.
    #[inline]
    pub
    fn failure (self: &'_ Self)
      -> Option<&'_ FailureSignal>
    {
        self.failure.as_ref()
    }

    /// Shared access to the body, e.g. to read a search cursor.
    #[inline]
    pub
    fn body (self: &'_ Self)
      -> &'_ C
    {
        &self.body
    }

    /// Run the body from the beginning up to its first suspension point (or
    /// to its end).
    ///
    /// Fails with [`Error::InvalidState`] if already started, or
    /// [`Error::Exhausted`] if terminal.
    pub
    fn start (self: &'_ mut Self)
      -> Result<SuspensionOutcome<C::Yield, C::Return>>
    {
        self.drive(Operation::Start, Resumption::Start)
    }

    /// Resume from the current suspension point. `value` becomes the result of
    /// the paused suspension expression: `None` for a plain resume, `Some` for
    /// an injection.
    pub
    fn resume (self: &'_ mut Self, value: Option<C::ResumeArg>)
      -> Result<SuspensionOutcome<C::Yield, C::Return>>
    {
        self.drive(Operation::Resume, Resumption::Value(value))
    }

    /// Raise `signal` at the current suspension point. If the body does not
    /// handle it, it comes back as [`SuspensionOutcome::Failed`].
    pub
    fn inject_failure (self: &'_ mut Self, signal: FailureSignal)
      -> Result<SuspensionOutcome<C::Yield, C::Return>>
    {
        self.drive(Operation::InjectFailure, Resumption::Failure(signal))
    }

    /// Push `value` into a primed computation: [`resume(Some(value))`][
    /// `Resumable::resume`], reported as a push.
    pub
    fn push (self: &'_ mut Self, value: C::ResumeArg)
      -> Result<SuspensionOutcome<C::Yield, C::Return>>
    {
        self.drive(Operation::Push, Resumption::Value(Some(value)))
    }

    /// Terminate the computation.
    ///
    /// The cancellation signal is delivered at the current suspension point
    /// (a never-started body is not run at all), and the cleanup block runs
    /// before this returns. The computation ends `Cancelled`, unless the body
    /// or its cleanup fails, in which case it ends `Failed` and the failure is
    /// returned.
    ///
    /// Cancelling a terminal computation does nothing and returns
    /// [`Error::Exhausted`].
    pub
    fn cancel (self: &'_ mut Self)
      -> Result<()>
    {
        self.cancel_as(Operation::Cancel)
    }

    pub(in crate)
    fn cancel_as (self: &'_ mut Self, operation: Operation)
      -> Result<()>
    {
        match self.lifecycle {
            | Lifecycle::Created => {
                match self.finish(Lifecycle::Cancelled, None) {
                    | None => Ok(()),
                    | Some(failure) => Err(failure.into()),
                }
            },
            | _ => match self.drive(operation, Resumption::Cancel)? {
                | SuspensionOutcome::Failed(signal)
                    if signal.is_cancellation().not()
                => {
                    Err(signal.into())
                },
                | _ => Ok(()),
            },
        }
    }

    fn drive (
        self: &'_ mut Self,
        operation: Operation,
        input: Resumption<C::ResumeArg>,
    ) -> Result<SuspensionOutcome<C::Yield, C::Return>>
    {
        let state = self.lifecycle;
        match (state, &input) {
            | (Lifecycle::Running, _) => {
                return Err(Error::ConcurrentAccess { operation });
            },
            | _ if state.is_terminal() => {
                return Err(Error::Exhausted { operation, state });
            },
            | (Lifecycle::Created, Resumption::Start) => {},
            | (Lifecycle::Created, _)
            | (Lifecycle::Suspended, Resumption::Start)
            => {
                return Err(Error::InvalidState { operation, state });
            },
            | _ => {},
        }
        let cancelling = matches!(input, Resumption::Cancel);
        self.transition(Lifecycle::Running);
        Ok(match self.step(input) {
            | GeneratorState::Yielded(_) if cancelling => {
                let failure = self.finish(
                    Lifecycle::Failed,
                    Some(FailureSignal::ignored_cancellation()),
                );
                SuspensionOutcome::Failed(failure.unwrap_or_else(FailureSignal::ignored_cancellation))
            },
            | GeneratorState::Yielded(value) => {
                self.produced += 1;
                self.transition(Lifecycle::Suspended);
                SuspensionOutcome::Produced(value)
            },
            | GeneratorState::Returned(_) if cancelling => {
                match self.finish(Lifecycle::Cancelled, None) {
                    | None => SuspensionOutcome::Failed(FailureSignal::cancellation()),
                    | Some(failure) => SuspensionOutcome::Failed(failure),
                }
            },
            | GeneratorState::Returned(value) => {
                match self.finish(Lifecycle::Completed, None) {
                    | None => SuspensionOutcome::Completed(value),
                    | Some(failure) => SuspensionOutcome::Failed(failure),
                }
            },
            | GeneratorState::Raised(signal) if signal.is_cancellation() => {
                match self.finish(Lifecycle::Cancelled, None) {
                    | None => SuspensionOutcome::Failed(signal),
                    | Some(failure) => SuspensionOutcome::Failed(failure),
                }
            },
            | GeneratorState::Raised(signal) => {
                let failure = self.finish(Lifecycle::Failed, Some(signal.clone()));
                SuspensionOutcome::Failed(failure.unwrap_or(signal))
            },
        })
    }

    /// Step the body; should it panic, the computation is failed and cleaned
    /// up while unwinding.
    fn step (self: &'_ mut Self, input: Resumption<C::ResumeArg>)
      -> GeneratorState<C::Yield, C::Return>
    {
        ::unwind_safe::with_state(self)
            .try_eval(move |this| this.body.resume_with(input))
            .finally(|this| if this.lifecycle == Lifecycle::Running
                && ::std::thread::panicking()
            {
                this.transition(Lifecycle::Failed);
                if let Err(failure) = this.run_cleanup() {
                    ::tracing::warn!(%failure, "cleanup failed while unwinding");
                }
            })
    }

    /// Move to a terminal state, running the cleanup block on the way.
    ///
    /// Returns the failure the computation ends with: `failure` itself, or a
    /// cleanup failure superseding it (with `failure` attached as context).
    fn finish (
        self: &'_ mut Self,
        terminal: Lifecycle,
        failure: Option<FailureSignal>,
    ) -> Option<FailureSignal>
    {
        // A panicking cleanup still leaves the computation terminal.
        let cleanup =
            ::unwind_safe::with_state(&mut *self)
                .try_eval(|this| this.run_cleanup())
                .finally(|this| if ::std::thread::panicking() {
                    this.transition(Lifecycle::Failed);
                })
        ;
        let failure = match cleanup {
            | Ok(()) => failure,
            | Err(cleanup_failure) => Some(cleanup_failure.with_context(failure)),
        };
        self.transition(if failure.is_some() { Lifecycle::Failed } else { terminal });
        self.failure = failure.clone();
        failure
    }

    fn run_cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        if ::core::mem::replace(&mut self.cleaned_up, true) {
            return Ok(());
        }
        ::tracing::debug!(produced = self.produced, "running cleanup");
        self.body.cleanup()
    }

    fn transition (self: &'_ mut Self, to: Lifecycle)
    {
        ::tracing::trace!(from = %self.lifecycle, %to, "lifecycle transition");
        self.lifecycle = to;
    }
}

impl<C : Coroutine> Drop for Resumable<C> {
    fn drop (self: &'_ mut Self)
    {
        if self.is_terminal() || self.lifecycle == Lifecycle::Running {
            return;
        }
        if let Err(err) = self.cancel() {
            ::tracing::warn!(%err, "implicit cancellation on drop failed");
        }
    }
}
