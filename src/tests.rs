#![allow(unused_imports)]
use {
    ::core::{
        cell::{Cell, RefCell},
        iter::FromIterator,
    },
    ::std::{*, prelude::v1::*, rc::Rc},
    crate::{
        pipeline::{self, Collect, ForEach, PipelineBuilder},
        sequences::{Countdown, PalindromeSearch},
        sources::IterSource,
    },
    super::*,
};

#[test]
fn countdown ()
{
    assert_it_eq!(
        Countdown::new(3).into_resumable(),
        [3, 2, 1],
    );
}

#[test]
fn resume_before_start_is_invalid ()
{
    let mut search = PalindromeSearch::new().into_resumable();
    assert_eq!(
        search.resume(Some(100)),
        Err(Error::InvalidState {
            operation: Operation::Resume,
            state: Lifecycle::Created,
        }),
    );
    assert_eq!(
        search.inject_failure(FailureSignal::new("ValueError", "too early")),
        Err(Error::InvalidState {
            operation: Operation::InjectFailure,
            state: Lifecycle::Created,
        }),
    );
    // Nothing was run: the search can still be started.
    assert_eq!(search.start(), Ok(SuspensionOutcome::Produced(11)));
}

#[test]
fn every_operation_on_a_terminal_computation_is_exhausted ()
{
    let mut countdown = Countdown::new(1).into_resumable();
    assert_eq!(countdown.start(), Ok(SuspensionOutcome::Produced(1)));
    assert_eq!(countdown.resume(None), Ok(SuspensionOutcome::Completed(())));
    assert_eq!(countdown.lifecycle(), Lifecycle::Completed);

    assert!(countdown.start().unwrap_err().is_exhausted());
    assert!(countdown.resume(None).unwrap_err().is_exhausted());
    assert!(countdown.inject_failure(FailureSignal::new("ValueError", "late"))
        .unwrap_err()
        .is_exhausted()
    );
    assert_eq!(
        countdown.cancel(),
        Err(Error::Exhausted {
            operation: Operation::Cancel,
            state: Lifecycle::Completed,
        }),
    );
}

#[test]
fn uncaught_injected_failure_fails_the_computation ()
{
    let cleanups = Rc::new(Cell::new(0));
    let mut search = PalindromeSearch::new().finally({
        let cleanups = cleanups.clone();
        move || cleanups.set(cleanups.get() + 1)
    }).into_resumable();
    search.start().unwrap();
    let signal = FailureSignal::new("ValueError", "Stop here");
    assert_eq!(
        search.inject_failure(signal.clone()),
        Ok(SuspensionOutcome::Failed(signal.clone())),
    );
    assert_eq!(search.lifecycle(), Lifecycle::Failed);
    assert_eq!(search.failure(), Some(&signal));
    assert_eq!(cleanups.get(), 1);

    // A fresh instance searches again from scratch.
    let mut fresh = PalindromeSearch::new().into_resumable();
    assert_eq!(fresh.start(), Ok(SuspensionOutcome::Produced(11)));
}

#[test]
fn drop_cancels_a_live_computation ()
{
    let cleanups = Rc::new(Cell::new(0));
    {
        let mut search = PalindromeSearch::new().finally({
            let cleanups = cleanups.clone();
            move || cleanups.set(cleanups.get() + 1)
        }).into_resumable();
        search.start().unwrap();
    }
    assert_eq!(cleanups.get(), 1);
}

#[test]
fn yielding_while_cancelled_is_a_failure ()
{
    struct Stubborn;
    impl Coroutine for Stubborn {
        type Yield = ();
        type ResumeArg = ();
        type Return = ();

        fn resume_with (self: &'_ mut Self, _: Resumption<()>)
          -> GeneratorState<()>
        {
            GeneratorState::Yielded(())
        }
    }

    let mut stubborn = Stubborn.into_resumable();
    stubborn.start().unwrap();
    match stubborn.cancel() {
        | Err(Error::Failure(signal)) => {
            assert_eq!(signal.kind(), &SignalKind::IgnoredCancellation);
        },
        | other => panic!("unexpected {:?}", other),
    }
    assert_eq!(stubborn.lifecycle(), Lifecycle::Failed);
}

#[test]
fn boxed_bodies_are_bodies ()
{
    let boxed: BoxedCoroutine<'_, u8, ()> = IterSource::new(vec![4_u8, 2]).boxed();
    assert_it_eq!(boxed.into_resumable(), [4, 2]);
}

#[test]
fn reentrant_push_is_detected ()
{
    let myself: Rc<RefCell<Option<pipeline::Downstream<u8>>>> = Rc::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = ForEach::new({
        let myself = myself.clone();
        let seen = seen.clone();
        move |value: u8| {
            if let Some(myself) = &*myself.borrow() {
                seen.borrow_mut().push(myself.push(value + 1));
            }
        }
    });
    let builder = PipelineBuilder::sink(sink);
    *myself.borrow_mut() = Some(pipeline::Downstream::new(builder.head()));
    let pipeline = builder.prime().unwrap();

    assert_eq!(pipeline.push(1), Ok(SuspensionOutcome::Produced(())));
    assert_eq!(
        *seen.borrow(),
        [Err(Error::ConcurrentAccess { operation: Operation::Push })],
    );
}

#[test]
fn pushing_into_an_unprimed_stage_is_invalid ()
{
    let builder = PipelineBuilder::sink(Collect::<u8>::new());
    assert_eq!(
        pipeline::push(builder.head(), 1),
        Err(Error::InvalidState {
            operation: Operation::Push,
            state: Lifecycle::Created,
        }),
    );
}

macro_rules! assert_it_eq {(
    $left:expr, $right:expr $(, $($msg:expr $(,)?)?)?
) => (
    assert_eq!(
        $left.into_iter().collect::<Vec<_>>(),
        $right,
        $($($msg ,)?)?
    )
)}
use assert_it_eq;
