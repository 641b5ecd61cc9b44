//! Delegation: running a nested computation from inside a body, forwarding
//! every resumption into it until it ends.
//!
//! A body that wants to delegate keeps a [`Delegation`] among its locals and,
//! while the nested computation is live, answers each of its own resumptions
//! by [`forward`][`Delegation::forward`]ing it. Values produced by the
//! nested computation are re-yielded as-is, so from the outside the two
//! sequences look like one. Once the nested computation ends, the delegating
//! body gets its outcome back and continues with its own code.
//!
//! [`Chain`] and [`FlatMap`] are the two delegating bodies this crate ships.

use_prelude!();

/// What became of a resumption forwarded into a nested computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub
enum Forwarded<Yield, Return> {
    /// The nested computation paused with a value: re-yield it.
    Suspended(Yield),
    /// The nested computation completed with a value: control is back.
    Finished(Return),
    /// A failure escaped the nested computation; it is now raised in the
    /// delegating body, which may handle it or re-raise it.
    Raised(FailureSignal),
    /// The nested computation has been cancelled (its cleanup has run).
    Cancelled,
}

/// The link from a delegating body to the nested computation it currently
/// forwards to.
pub
struct Delegation<C : Coroutine> {
    nested: Resumable<C>,
}

impl<C : Coroutine> Delegation<C> {
    /// Prepare to delegate to `nested`. It is started by the first
    /// [`forward()`][`Delegation::forward`].
    pub
    fn new (nested: C)
      -> Self
    {
        Self {
            nested: Resumable::new(nested),
        }
    }

    /// The nested computation, e.g. to check how it ended.
    #[inline]
    pub
    fn nested (self: &'_ Self)
      -> &'_ Resumable<C>
    {
        &self.nested
    }

    /// Deliver the delegating body's own resumption to the nested
    /// computation.
    ///
    /// Cancelling a nested computation that already ended does nothing and
    /// reports it [`Cancelled`][Forwarded::Cancelled], as
    /// [`close()`][Delegation::close] does.
    ///
    /// A nested computation that has not been started yet is started by the
    /// first non-cancelling input (an injected value is then discarded, as
    /// there is no suspension point to receive it); a failure signal
    /// delivered before it started cancels it and is raised right back.
    pub
    fn forward (self: &'_ mut Self, input: Resumption<C::ResumeArg>)
      -> Result<Forwarded<C::Yield, C::Return>>
    {
        let created = self.nested.lifecycle() == Lifecycle::Created;
        let outcome = match input {
            | Resumption::Cancel if self.nested.is_terminal() => {
                return Ok(Forwarded::Cancelled);
            },
            | Resumption::Cancel => {
                ::tracing::debug!("forwarding cancellation to the nested computation");
                return match self.nested.cancel() {
                    | Ok(()) => Ok(Forwarded::Cancelled),
                    | Err(Error::Failure(signal)) => Ok(Forwarded::Raised(signal)),
                    | Err(err) => Err(err),
                };
            },
            | Resumption::Failure(signal) if created => {
                if let Err(Error::Failure(cleanup_failure)) = self.nested.cancel() {
                    return Ok(Forwarded::Raised(cleanup_failure.with_context(signal)));
                }
                return Ok(Forwarded::Raised(signal));
            },
            | _ if created => {
                ::tracing::debug!("delegating to a nested computation");
                self.nested.start()?
            },
            | Resumption::Start => self.nested.start()?,
            | Resumption::Value(value) => self.nested.resume(value)?,
            | Resumption::Failure(signal) => self.nested.inject_failure(signal)?,
        };
        Ok(match outcome {
            | SuspensionOutcome::Produced(value) => Forwarded::Suspended(value),
            | SuspensionOutcome::Completed(value) => Forwarded::Finished(value),
            | SuspensionOutcome::Failed(signal) if signal.is_cancellation() => {
                Forwarded::Cancelled
            },
            | SuspensionOutcome::Failed(signal) => Forwarded::Raised(signal),
        })
    }

    /// Cancel the nested computation unless it already ended, for use from a
    /// delegating body's cleanup block.
    pub
    fn close (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        if self.nested.is_terminal() {
            return Ok(());
        }
        match self.nested.cancel() {
            | Err(Error::Failure(signal)) => Err(signal),
            | _ => Ok(()),
        }
    }
}

/// Lift the outcome of a forward into the delegating body's own step, for
/// bodies that re-raise everything.
fn lift<Yield, Return, R> (
    forwarded: Result<Forwarded<Yield, R>>,
    on_finished: impl FnOnce(R) -> GeneratorState<Yield, Return>,
) -> GeneratorState<Yield, Return>
{
    match forwarded {
        | Ok(Forwarded::Suspended(value)) => GeneratorState::Yielded(value),
        | Ok(Forwarded::Finished(value)) => on_finished(value),
        | Ok(Forwarded::Raised(signal)) => GeneratorState::Raised(signal),
        | Ok(Forwarded::Cancelled) => GeneratorState::cancelled(),
        | Err(err) => GeneratorState::Raised(err.into()),
    }
}

/// All the values of `A`, then all the values of `B`.
///
/// `B` is built by a closure the first time `A` completes, so it never starts
/// (nor even exists) if the composite is cancelled or fails before that.
pub
struct Chain<A : Coroutine, B : Coroutine, F> {
    first: Delegation<A>,
    make_second: Option<F>,
    second: Option<Delegation<B>>,
}

impl<A, B, F> Chain<A, B, F>
where
    A : Coroutine,
    B : Coroutine<Yield = A::Yield, ResumeArg = A::ResumeArg>,
    F : FnOnce() -> B,
{
    /// `first`, then the computation `make_second` builds.
    pub
    fn new (first: A, make_second: F)
      -> Self
    {
        Self {
            first: Delegation::new(first),
            make_second: Some(make_second),
            second: None,
        }
    }
}

impl<A, B, F> Coroutine for Chain<A, B, F>
where
    A : Coroutine,
    B : Coroutine<Yield = A::Yield, ResumeArg = A::ResumeArg>,
    F : FnOnce() -> B,
{
    type Yield = A::Yield;
    type ResumeArg = A::ResumeArg;
    type Return = B::Return;

    fn resume_with (self: &'_ mut Self, input: Resumption<A::ResumeArg>)
      -> GeneratorState<A::Yield, B::Return>
    {
        if let Some(second) = self.second.as_mut() {
            return lift(second.forward(input), GeneratorState::Returned);
        }
        let Self { first, make_second, second } = self;
        lift(first.forward(input), |_| {
            let make_second = match make_second.take() {
                | Some(it) => it,
                | None => return GeneratorState::Raised(FailureSignal::new(
                    "RuntimeError",
                    "chained computation was already built",
                )),
            };
            let second = second.get_or_insert(Delegation::new(make_second()));
            lift(second.forward(Resumption::Start), GeneratorState::Returned)
        })
    }

    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        let first = self.first.close();
        let second = self.second.as_mut().map_or(Ok(()), Delegation::close);
        first.and(second)
    }
}

/// Flattens a sequence of sequences: each value produced by the outer
/// computation is mapped to a nested computation, which is delegated to until
/// it ends, before the outer computation is resumed for the next one.
///
/// Injections and failures are forwarded to the nested computation that is
/// currently live. Cancelling cancels the live nested computation first, then
/// the outer one.
pub
struct FlatMap<S : Coroutine, C : Coroutine, F> {
    outer: Resumable<S>,
    f: F,
    current: Option<Delegation<C>>,
}

impl<S, C, F> FlatMap<S, C, F>
where
    S : Coroutine,
    C : Coroutine,
    F : FnMut(S::Yield) -> C,
{
    /// Delegate to `f(item)` for every `item` of `outer`.
    pub
    fn new (outer: S, f: F)
      -> Self
    {
        Self {
            outer: Resumable::new(outer),
            f,
            current: None,
        }
    }

    fn cancel_all (self: &'_ mut Self)
      -> GeneratorState<C::Yield, S::Return>
    {
        if let Some(current) = self.current.as_mut() {
            if let Err(signal) = current.close() {
                return GeneratorState::Raised(signal);
            }
        }
        if self.outer.is_terminal().not() {
            if let Err(err) = self.outer.cancel() {
                return GeneratorState::Raised(err.into());
            }
        }
        GeneratorState::cancelled()
    }
}

impl<S, C, F> Coroutine for FlatMap<S, C, F>
where
    S : Coroutine,
    C : Coroutine,
    F : FnMut(S::Yield) -> C,
{
    type Yield = C::Yield;
    type ResumeArg = C::ResumeArg;
    type Return = S::Return;

    fn resume_with (self: &'_ mut Self, input: Resumption<C::ResumeArg>)
      -> GeneratorState<C::Yield, S::Return>
    {
        if let Resumption::Cancel = input {
            return self.cancel_all();
        }
        let mut pending = Some(input);
        loop {
            if let Some(current) = self.current.as_mut() {
                let input = pending.take().unwrap_or(Resumption::Start);
                match current.forward(input) {
                    | Ok(Forwarded::Finished(_)) => self.current = None,
                    | Ok(Forwarded::Suspended(value)) => {
                        return GeneratorState::Yielded(value);
                    },
                    | Ok(Forwarded::Raised(signal)) => return GeneratorState::Raised(signal),
                    | Ok(Forwarded::Cancelled) => return GeneratorState::cancelled(),
                    | Err(err) => return GeneratorState::Raised(err.into()),
                }
            }
            let outcome = match self.outer.lifecycle() {
                | Lifecycle::Created => self.outer.start(),
                | _ => self.outer.resume(None),
            };
            match outcome {
                | Ok(SuspensionOutcome::Produced(item)) => {
                    self.current = Some(Delegation::new((self.f)(item)));
                },
                | Ok(SuspensionOutcome::Completed(value)) => {
                    return GeneratorState::Returned(value);
                },
                | Ok(SuspensionOutcome::Failed(signal)) => {
                    return GeneratorState::Raised(signal);
                },
                | Err(err) => return GeneratorState::Raised(err.into()),
            }
        }
    }

    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        let current = self.current.as_mut().map_or(Ok(()), Delegation::close);
        let outer = if self.outer.is_terminal() {
            Ok(())
        } else {
            self.outer.cancel().or_else(|err| match err {
                | Error::Failure(signal) => Err(signal),
                | _ => Ok(()),
            })
        };
        current.and(outer)
    }
}
