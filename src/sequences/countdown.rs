use_prelude!();

/// `start, start - 1, …, 1`, then completes.
#[derive(Debug, Clone)]
pub
struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Count down from `start`.
    pub
    fn new (start: u32)
      -> Self
    {
        Self { remaining: start }
    }
}

impl Coroutine for Countdown {
    type Yield = u32;
    type ResumeArg = ();
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<()>)
      -> GeneratorState<u32>
    {
        match input {
            | Resumption::Start | Resumption::Value(_) => {},
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        match self.remaining.checked_sub(1) {
            | Some(next) => {
                let current = self.remaining;
                self.remaining = next;
                GeneratorState::Yielded(current)
            },
            | None => GeneratorState::Returned(()),
        }
    }
}
