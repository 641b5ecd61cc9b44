use_prelude!();

/// What can be sent to a [`ResettableCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub
enum CounterCommand {
    /// Add one to the count.
    Increment,
}

/// Produces its count at every suspension point.
///
/// Resuming with [`CounterCommand::Increment`] bumps the count; resuming
/// without a value leaves it alone. A failure named `"Reset"` injected at the
/// suspension point is handled by the counter itself, which starts over from
/// zero; any other failure ends it.
///
/// ```rust
/// use ::resumable::prelude::*;
/// use ::resumable::sequences::{CounterCommand::Increment, ResettableCounter};
///
/// let mut counter = ResettableCounter::new().into_resumable();
/// assert_eq!(counter.start(), Ok(SuspensionOutcome::Produced(0)));
/// assert_eq!(counter.resume(Some(Increment)), Ok(SuspensionOutcome::Produced(1)));
/// assert_eq!(counter.resume(Some(Increment)), Ok(SuspensionOutcome::Produced(2)));
/// assert_eq!(
///     counter.inject_failure(FailureSignal::new("Reset", "start over")),
///     Ok(SuspensionOutcome::Produced(0)),
/// );
/// assert_eq!(counter.resume(Some(Increment)), Ok(SuspensionOutcome::Produced(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub
struct ResettableCounter {
    count: u64,
    resets: usize,
}

impl ResettableCounter {
    /// A counter at `0`.
    pub
    fn new ()
      -> Self
    {
        Self::default()
    }

    /// How many resets were handled.
    #[inline]
    pub
    fn resets (self: &'_ Self)
      -> usize
    {
        self.resets
    }
}

impl Coroutine for ResettableCounter {
    type Yield = u64;
    type ResumeArg = CounterCommand;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<CounterCommand>)
      -> GeneratorState<u64>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(CounterCommand::Increment)) => {
                self.count = self.count.saturating_add(1);
            },
            | Resumption::Failure(signal) if signal.is("Reset") => {
                ::tracing::debug!(count = self.count, "counter reset");
                self.count = 0;
                self.resets += 1;
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        GeneratorState::Yielded(self.count)
    }
}
