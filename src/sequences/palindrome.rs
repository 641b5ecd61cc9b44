use_prelude!();

use ::core::convert::Infallible;

/// Whether the decimal digits of `n` read the same both ways.
///
/// Single-digit numbers are not considered palindromes.
///
/// ```rust
/// use ::resumable::sequences::is_palindrome;
///
/// assert!(is_palindrome(121));
/// assert!(!is_palindrome(7));
/// assert!(!is_palindrome(120));
/// ```
pub
fn is_palindrome (n: u64)
  -> bool
{
    if n < 10 {
        return false;
    }
    let mut remaining = n;
    let mut reversed: u64 = 0;
    while remaining > 0 {
        // `reversed` has as many digits as `n`, but may still overflow
        // `u64` when `n` is large and ends with a big digit.
        reversed = match reversed.checked_mul(10).and_then(|it| it.checked_add(remaining % 10)) {
            | Some(it) => it,
            | None => return false,
        };
        remaining /= 10;
    }
    reversed == n
}

/// An endless search for [palindromes][is_palindrome], in increasing order
/// from `0` (or from [`starting_at`][`PalindromeSearch::starting_at`]).
///
/// Every time it pauses on a palindrome, the search may be redirected by
/// injecting a number: the cursor jumps there, then moves on by one before
/// the next check. Resuming without injection just moves on by one.
///
/// The search never completes: stop it with
/// [`cancel()`][`Resumable::cancel`]. Once stopped, it cannot be restarted.
///
/// ```rust
/// use ::resumable::prelude::*;
/// use ::resumable::sequences::PalindromeSearch;
///
/// let mut search = PalindromeSearch::new().into_resumable();
/// assert_eq!(search.start(), Ok(SuspensionOutcome::Produced(11)));
/// assert_eq!(search.resume(Some(100)), Ok(SuspensionOutcome::Produced(101)));
/// assert_eq!(search.resume(None), Ok(SuspensionOutcome::Produced(111)));
/// search.cancel().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub
struct PalindromeSearch {
    cursor: u64,
}

impl PalindromeSearch {
    /// Search from `0`.
    pub
    fn new ()
      -> Self
    {
        Self::starting_at(0)
    }

    /// Search from `cursor` (included).
    pub
    fn starting_at (cursor: u64)
      -> Self
    {
        Self { cursor }
    }

    /// Where the search currently stands: the last palindrome produced while
    /// the search is paused.
    #[inline]
    pub
    fn cursor (self: &'_ Self)
      -> u64
    {
        self.cursor
    }

    fn advance (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        self.cursor = self.cursor.checked_add(1).ok_or_else(|| {
            FailureSignal::new("OverflowError", "palindrome search ran out of numbers")
        })?;
        Ok(())
    }
}

impl Coroutine for PalindromeSearch {
    type Yield = u64;
    type ResumeArg = u64;
    type Return = Infallible;

    fn resume_with (self: &'_ mut Self, input: Resumption<u64>)
      -> GeneratorState<u64, Infallible>
    {
        match input {
            | Resumption::Start => {},
            | Resumption::Value(jump) => {
                if let Some(jump) = jump {
                    self.cursor = jump;
                }
                if let Err(signal) = self.advance() {
                    return GeneratorState::Raised(signal);
                }
            },
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        while is_palindrome(self.cursor).not() {
            if let Err(signal) = self.advance() {
                return GeneratorState::Raised(signal);
            }
        }
        GeneratorState::Yielded(self.cursor)
    }

    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        ::tracing::info!(cursor = self.cursor, "palindrome search is closing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers ()
    {
        for n in 0 .. 10 {
            assert!(!is_palindrome(n));
        }
        assert!(is_palindrome(11));
        assert!(is_palindrome(1001));
        assert!(is_palindrome(12321));
        assert!(!is_palindrome(10));
        assert!(!is_palindrome(1231));
    }

    #[test]
    fn large_numbers ()
    {
        assert!(!is_palindrome(u64::MAX));
        assert!(is_palindrome(18_446_744_066_044_764_481));
    }

    #[test]
    fn overflow_is_raised ()
    {
        let mut search = PalindromeSearch::starting_at(u64::MAX - 2).into_resumable();
        match search.start() {
            | Ok(SuspensionOutcome::Failed(signal)) => assert!(signal.is("OverflowError")),
            | other => panic!("unexpected {:?}", other),
        }
        assert_eq!(search.lifecycle(), Lifecycle::Failed);
    }
}
