//! The body side of a resumable computation: an explicit state machine that
//! is stepped once per resumption.

use_prelude!();

/// What a body receives each time it is stepped.
///
/// This is the "result of the suspension expression": the runtime hands the
/// body a tagged value, and the body decides what to do with it by pattern
/// matching, rather than having failures thrown into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub
enum Resumption<ResumeArg> {
    /// First step: run from the beginning up to the first suspension point.
    Start,

    /// Resumed from a suspension point, with (`Some`) or without (`None`) an
    /// injected value.
    Value(Option<ResumeArg>),

    /// A failure signal raised at the suspension point. Bodies may catch it,
    /// or hand it back through [`GeneratorState::Raised`] to fail.
    Failure(FailureSignal),

    /// Cancellation requested. The body should release whatever it is in the
    /// middle of (and, for pipeline stages, close its downstream), then exit by
    /// returning or by re-raising [`FailureSignal::cancellation()`].
    Cancel,
}

/// Value obtained when stepping a [`Coroutine`] body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub
enum GeneratorState<Yield, Return = ()> {
    /// The body reached a suspension point with a value.
    Yielded(Yield),

    /// The body _completed_ with a [`Return`][`Coroutine::Return`] value.
    Returned(Return),

    /// The body ended with an uncaught failure signal.
    Raised(FailureSignal),
}

impl<Yield> GeneratorState<Yield, ()> {
    /// Alias for `Returned(())`.
    #[allow(nonstandard_style)]
    pub
    const Complete: Self = Self::Returned(());
}

impl<Yield, Return> GeneratorState<Yield, Return> {
    /// Re-raise the cancellation signal: the usual answer to
    /// [`Resumption::Cancel`].
    #[inline]
    pub
    fn cancelled ()
      -> Self
    {
        Self::Raised(FailureSignal::cancellation())
    }
}

/// The trait implemented by the bodies of resumable computations.
///
/// A body is a plain struct owning its locals and an explicit record of where
/// it stopped. Each call to [`resume_with()`][`Coroutine::resume_with`] runs
/// it from that position up to the next suspension point (or to its end).
///
/// Bodies are not driven directly: wrap them in a [`Resumable`], which
/// enforces the lifecycle and guarantees [`cleanup()`][`Coroutine::cleanup`]
/// runs exactly once.
///
/// # Example
///
/// ```rust
/// use ::resumable::prelude::*;
///
/// /// Yields `0, 1, 2, …` until told to stop; an injected value replaces the
/// /// counter.
/// struct Counter { next: u32 }
///
/// impl Coroutine for Counter {
///     type Yield = u32;
///     type ResumeArg = u32;
///     type Return = ();
///
///     fn resume_with (self: &'_ mut Self, input: Resumption<u32>)
///       -> GeneratorState<u32>
///     {
///         match input {
///             | Resumption::Start | Resumption::Value(None) => {},
///             | Resumption::Value(Some(n)) => self.next = n,
///             | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
///             | Resumption::Cancel => return GeneratorState::Returned(()),
///         }
///         let current = self.next;
///         self.next += 1;
///         GeneratorState::Yielded(current)
///     }
/// }
///
/// let mut counter = Counter { next: 0 }.into_resumable();
/// assert_eq!(counter.start(), Ok(SuspensionOutcome::Produced(0)));
/// assert_eq!(counter.resume(None), Ok(SuspensionOutcome::Produced(1)));
/// assert_eq!(counter.resume(Some(10)), Ok(SuspensionOutcome::Produced(10)));
/// counter.cancel().unwrap();
/// assert_eq!(counter.lifecycle(), Lifecycle::Cancelled);
/// ```
pub
trait Coroutine {
    /// The type of value produced at each suspension point.
    type Yield;

    /// The type of value that may be injected when resuming.
    type ResumeArg;

    /// The type of value the body completes with.
    type Return;

    /// Run the body from its saved position until the next suspension point
    /// or until it ends.
    fn resume_with (self: &'_ mut Self, input: Resumption<Self::ResumeArg>)
      -> GeneratorState<Self::Yield, Self::Return>
    ;

    /// The body's cleanup block.
    ///
    /// Called by the runtime exactly once, on the transition to any terminal
    /// state (natural end, failure, cancellation, or a panic unwinding out of
    /// [`resume_with()`][`Coroutine::resume_with`]). It is also called when a
    /// computation is cancelled before ever being started.
    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        Ok(())
    }
}

// # TRANSITIVE IMPLS
impl<C : ?Sized>
    Coroutine
for
    &'_ mut C
where
    C : Coroutine,
{
    transitive_impl_deferring_to!(|self| &mut **self);
}

impl<C : ?Sized>
    Coroutine
for
    Box<C>
where
    C : Coroutine,
{
    transitive_impl_deferring_to!(|self| &mut **self);
}

// where:
macro_rules! transitive_impl_deferring_to {(
    |$self:tt| $expr:expr $(,)?
) => (
    type Yield = C::Yield;
    type ResumeArg = C::ResumeArg;
    type Return = C::Return;

    #[inline]
    fn resume_with (
        $self: &'_ mut Self,
        input: Resumption<C::ResumeArg>,
    ) -> GeneratorState<C::Yield, C::Return>
    {
        <C as Coroutine>::resume_with($expr, input)
    }

    #[inline]
    fn cleanup ($self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        <C as Coroutine>::cleanup($expr)
    }
)} use transitive_impl_deferring_to;

/// A type-erased push stage / sink body.
pub
type BoxedCoroutine<'lt, Yield, ResumeArg, Return = ()> = Box<
    dyn 'lt + Coroutine<Yield = Yield, ResumeArg = ResumeArg, Return = Return>
>;

/// Extension trait with some convenience constructors for [`Coroutine`]s.
pub
trait CoroutineExt
:
    Coroutine +
    Sized +
{
    /// Wrap this body into the runtime that drives it.
    #[inline]
    fn into_resumable (self: Self)
      -> Resumable<Self>
    {
        Resumable::new(self)
    }

    /// All of `self`'s values, then all of the values of the computation built
    /// by `next`. That one is only built (and started) once `self` has
    /// completed.
    ///
    /// ```rust
    /// use ::resumable::prelude::*;
    /// use ::resumable::sources::IterSource;
    ///
    /// let both =
    ///     IterSource::new(vec![1, 2])
    ///         .chain(|| IterSource::new(vec![3, 4]))
    ///         .into_resumable()
    /// ;
    /// assert_eq!(both.collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// ```
    #[inline]
    fn chain<Next, F> (self: Self, next: F)
      -> Chain<Self, Next, F>
    where
        F : FnOnce() -> Next,
        Next : Coroutine<Yield = Self::Yield, ResumeArg = Self::ResumeArg>,
    {
        Chain::new(self, next)
    }

    /// Flatten a sequence of sequences: each value `self` produces is turned
    /// into a nested computation through `f`, which is then delegated to until
    /// it ends.
    #[inline]
    fn flat_map<Nested, F> (self: Self, f: F)
      -> FlatMap<Self, Nested, F>
    where
        F : FnMut(Self::Yield) -> Nested,
        Nested : Coroutine,
    {
        FlatMap::new(self, f)
    }

    /// Only let through the produced values matching `predicate`.
    #[inline]
    fn filter_yield<P> (self: Self, predicate: P)
      -> FilterYield<Self, P>
    where
        P : FnMut(&Self::Yield) -> bool,
    {
        FilterYield::new(self, predicate)
    }

    /// Append `action` to this body's cleanup block.
    #[inline]
    fn finally<F> (self: Self, action: F)
      -> Finally<Self, F>
    where
        F : FnMut(),
    {
        Finally::new(self, action)
    }

    /// Type-erase this body.
    #[inline]
    fn boxed<'lt> (self: Self)
      -> BoxedCoroutine<'lt, Self::Yield, Self::ResumeArg, Self::Return>
    where
        Self : 'lt,
    {
        Box::new(self)
    }
}

impl<C> CoroutineExt for C
where
    C : Coroutine,
{}
