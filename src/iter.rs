//! Pull-style driving: any [`Resumable`] is an [`Iterator`] over the values
//! it produces.
//!
//! Each `.next()` starts the computation if it is still `Created`, and
//! otherwise resumes it without injecting anything. Iteration stops at the
//! first terminal outcome; a failure is kept for inspection through
//! [`Resumable::failure()`].
//!
//! Mixing this with [`.resume(Some(..))`][`Resumable::resume`] calls is
//! allowed, but each such call advances the same computation: whatever it
//! produces is only seen by whoever looks at its return value.
use_prelude!();

impl<C : Coroutine> Iterator for Resumable<C> {
    type Item = C::Yield;

    fn next (self: &'_ mut Self)
      -> Option<C::Yield>
    {
        let outcome = match self.lifecycle() {
            | Lifecycle::Created => self.start(),
            | Lifecycle::Suspended => self.resume(None),
            | _ => return None,
        };
        match outcome {
            | Ok(SuspensionOutcome::Produced(value)) => Some(value),
            | Ok(SuspensionOutcome::Completed(_)) => None,
            | Ok(SuspensionOutcome::Failed(failure)) => {
                ::tracing::debug!(%failure, "iteration stopped by a failure");
                None
            },
            | Err(err) => {
                ::tracing::debug!(%err, "iteration stopped");
                None
            },
        }
    }
}
