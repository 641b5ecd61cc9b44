//! Body adaptors built through [`CoroutineExt`].

use_prelude!();

/// See [`CoroutineExt::filter_yield`].
pub
struct FilterYield<C, P> {
    inner: C,
    predicate: P,
}

impl<C, P> FilterYield<C, P>
where
    C : Coroutine,
    P : FnMut(&C::Yield) -> bool,
{
    /// Let through the values of `inner` matching `predicate`.
    pub
    fn new (inner: C, predicate: P)
      -> Self
    {
        Self { inner, predicate }
    }
}

impl<C, P> Coroutine for FilterYield<C, P>
where
    C : Coroutine,
    P : FnMut(&C::Yield) -> bool,
{
    type Yield = C::Yield;
    type ResumeArg = C::ResumeArg;
    type Return = C::Return;

    fn resume_with (self: &'_ mut Self, input: Resumption<C::ResumeArg>)
      -> GeneratorState<C::Yield, C::Return>
    {
        let mut state = self.inner.resume_with(input);
        loop {
            match state {
                | GeneratorState::Yielded(value) if (self.predicate)(&value) => {
                    return GeneratorState::Yielded(value);
                },
                | GeneratorState::Yielded(_) => {
                    state = self.inner.resume_with(Resumption::Value(None));
                },
                | done => return done,
            }
        }
    }

    #[inline]
    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        self.inner.cleanup()
    }
}

/// See [`CoroutineExt::finally`].
///
/// `action` runs right after the inner cleanup block, even when that one
/// fails.
pub
struct Finally<C, F> {
    inner: C,
    action: F,
}

impl<C, F> Finally<C, F>
where
    C : Coroutine,
    F : FnMut(),
{
    /// Run `action` after the cleanup block of `inner`.
    pub
    fn new (inner: C, action: F)
      -> Self
    {
        Self { inner, action }
    }
}

impl<C, F> Coroutine for Finally<C, F>
where
    C : Coroutine,
    F : FnMut(),
{
    type Yield = C::Yield;
    type ResumeArg = C::ResumeArg;
    type Return = C::Return;

    #[inline]
    fn resume_with (self: &'_ mut Self, input: Resumption<C::ResumeArg>)
      -> GeneratorState<C::Yield, C::Return>
    {
        self.inner.resume_with(input)
    }

    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        let inner = self.inner.cleanup();
        (self.action)();
        inner
    }
}
