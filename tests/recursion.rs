//! Deep recursion without a deep stack: each level of the recursion is a
//! suspended computation, yielding the argument it wants computed and
//! receiving the result as an injected value.

use ::resumable::{prelude::*, Result};

const N: u64 = 1_u64 << 16;
const OUTPUT: u64 = 2147516416;

#[test]
fn triangular_on_the_heap ()
{
    assert_eq!(
        drive_recursion(N, Triangular::new),
        Ok(OUTPUT),
    );
}

#[test]
fn triangular_base_case ()
{
    assert_eq!(drive_recursion(0, Triangular::new), Ok(0));
    assert_eq!(drive_recursion(3, Triangular::new), Ok(6));
}

/// `n + triangular(n - 1)`, requesting `triangular(n - 1)` by yielding
/// `n - 1`.
struct Triangular {
    n: u64,
}

impl Triangular {
    fn new (n: u64)
      -> Self
    {
        Self { n }
    }
}

impl Coroutine for Triangular {
    type Yield = u64;
    type ResumeArg = u64;
    type Return = u64;

    fn resume_with (self: &'_ mut Self, input: Resumption<u64>)
      -> GeneratorState<u64, u64>
    {
        match input {
            | Resumption::Start if self.n == 0 => GeneratorState::Returned(0),
            | Resumption::Start => GeneratorState::Yielded(self.n - 1),
            | Resumption::Value(Some(below)) => GeneratorState::Returned(self.n + below),
            | Resumption::Value(None) => GeneratorState::Raised(FailureSignal::new(
                "ValueError",
                "resumed without the requested result",
            )),
            | Resumption::Failure(signal) => GeneratorState::Raised(signal),
            | Resumption::Cancel => GeneratorState::cancelled(),
        }
    }
}

/// The driver: starts with the initial argument, and whenever a computation
/// yields a new argument, suspends it on a stack and starts computing that
/// one. A completed computation's result is injected into the one below.
fn drive_recursion<C> (
    arg: u64,
    mut start_computing: impl FnMut(u64) -> C,
) -> Result<u64>
where
    C : Coroutine<Yield = u64, ResumeArg = u64, Return = u64>,
{
    let mut suspended: Vec<Resumable<C>> = vec![];
    let mut current = start_computing(arg).into_resumable();
    let mut outcome = current.start()?;
    loop {
        match outcome {
            | SuspensionOutcome::Produced(arg) => {
                suspended.push(current);
                current = start_computing(arg).into_resumable();
                outcome = current.start()?;
            },
            | SuspensionOutcome::Completed(result) => match suspended.pop() {
                | None => return Ok(result),
                | Some(below) => {
                    current = below;
                    outcome = current.resume(Some(result))?;
                },
            },
            | SuspensionOutcome::Failed(signal) => return Err(signal.into()),
        }
    }
}
