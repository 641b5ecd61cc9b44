use_prelude!();

/// Answers every pushed number with the mean of all the numbers pushed so
/// far.
///
/// Priming it produces `None` (nothing averaged yet). This is a push target
/// that _answers_: its means only exist in the outcomes of the pushes, so a
/// caller discarding those outcomes loses them.
///
/// ```rust
/// use ::resumable::prelude::*;
/// use ::resumable::sequences::RunningAverage;
///
/// let mut average = RunningAverage::new().into_resumable();
/// assert_eq!(average.start(), Ok(SuspensionOutcome::Produced(None)));
/// assert_eq!(average.push(10.0), Ok(SuspensionOutcome::Produced(Some(10.0))));
/// assert_eq!(average.push(20.0), Ok(SuspensionOutcome::Produced(Some(15.0))));
/// assert_eq!(average.push(30.0), Ok(SuspensionOutcome::Produced(Some(20.0))));
/// ```
#[derive(Debug, Clone, Default)]
pub
struct RunningAverage {
    total: f64,
    count: u32,
}

impl RunningAverage {
    /// Nothing averaged yet.
    pub
    fn new ()
      -> Self
    {
        Self::default()
    }

    fn mean (self: &'_ Self)
      -> Option<f64>
    {
        if self.count == 0 {
            None
        } else {
            Some(self.total / f64::from(self.count))
        }
    }
}

impl Coroutine for RunningAverage {
    type Yield = Option<f64>;
    type ResumeArg = f64;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<f64>)
      -> GeneratorState<Option<f64>>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(x)) => {
                self.total += x;
                self.count += 1;
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::Returned(()),
        }
        GeneratorState::Yielded(self.mean())
    }
}
