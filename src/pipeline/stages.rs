//! Intermediate stages: each one forwards (some of) what it receives to its
//! [`Downstream`].

use_prelude!();

use super::Downstream;

/// Forwards the values matching `predicate`, and drops the others.
pub
struct Retain<T, P> {
    predicate: P,
    downstream: Downstream<T>,
}

impl<T, P> Retain<T, P>
where
    P : FnMut(&T) -> bool,
{
    /// Forward to `downstream` whatever matches `predicate`.
    pub
    fn new (predicate: P, downstream: Downstream<T>)
      -> Self
    {
        Self { predicate, downstream }
    }
}

impl<T, P> Coroutine for Retain<T, P>
where
    P : FnMut(&T) -> bool,
{
    type Yield = ();
    type ResumeArg = T;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<T>)
      -> GeneratorState<()>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(value)) => if (self.predicate)(&value) {
                if let Err(signal) = self.downstream.forward(value) {
                    return GeneratorState::Raised(signal);
                }
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return self.downstream.cascade_close(),
        }
        GeneratorState::Yielded(())
    }
}

/// Forwards `f(value)` for every `value` it receives.
pub
struct MapStage<T, U, F> {
    f: F,
    downstream: Downstream<U>,
    _accepts: PhantomData<fn(T)>,
}

impl<T, U, F> MapStage<T, U, F>
where
    F : FnMut(T) -> U,
{
    /// Forward `f(value)` to `downstream`.
    pub
    fn new (f: F, downstream: Downstream<U>)
      -> Self
    {
        Self {
            f,
            downstream,
            _accepts: PhantomData,
        }
    }
}

impl<T, U, F> Coroutine for MapStage<T, U, F>
where
    F : FnMut(T) -> U,
{
    type Yield = ();
    type ResumeArg = T;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<T>)
      -> GeneratorState<()>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(value)) => {
                if let Err(signal) = self.downstream.forward((self.f)(value)) {
                    return GeneratorState::Raised(signal);
                }
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return self.downstream.cascade_close(),
        }
        GeneratorState::Yielded(())
    }
}

/// Forwards everything untouched, letting `f` look at each value on its way.
pub
struct Inspect<T, F> {
    f: F,
    downstream: Downstream<T>,
}

impl<T, F> Inspect<T, F>
where
    F : FnMut(&T),
{
    /// Show every value to `f`, then forward it to `downstream`.
    pub
    fn new (f: F, downstream: Downstream<T>)
      -> Self
    {
        Self { f, downstream }
    }
}

impl<T, F> Coroutine for Inspect<T, F>
where
    F : FnMut(&T),
{
    type Yield = ();
    type ResumeArg = T;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<T>)
      -> GeneratorState<()>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(value)) => {
                (self.f)(&value);
                if let Err(signal) = self.downstream.forward(value) {
                    return GeneratorState::Raised(signal);
                }
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return self.downstream.cascade_close(),
        }
        GeneratorState::Yielded(())
    }
}
