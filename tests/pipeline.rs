use {
    ::std::{
        cell::RefCell,
        rc::Rc,
    },
    ::resumable::{
        pipeline::{self, Collect, Downstream, Inspect, MapStage, PipelineBuilder, Retain},
        prelude::*,
        sequences::RunningAverage,
        Operation,
        SignalKind,
    },
};

fn lines ()
  -> Vec<String>
{
    ["INFO a", "ERROR b", "INFO c", "ERROR d"]
        .iter()
        .map(|&line| line.to_owned())
        .collect()
}

#[test]
fn error_filter ()
{
    let sink = Collect::<String>::new();
    let collected = sink.items();
    let pipeline =
        PipelineBuilder::sink(sink)
            .named("collect")
            .stage(|downstream| Retain::new(|line: &String| line.contains("ERROR"), downstream))
            .named("grep")
            .stage(|downstream| MapStage::new(|line: String| line.trim().to_owned(), downstream))
            .named("trim")
            .prime()
            .unwrap()
    ;
    assert_eq!(
        pipeline.lifecycles(),
        [
            ("trim", Lifecycle::Suspended),
            ("grep", Lifecycle::Suspended),
            ("collect", Lifecycle::Suspended),
        ],
    );

    assert_eq!(pipeline.run(lines()), Ok(4));
    assert_eq!(collected.to_vec(), ["ERROR b", "ERROR d"]);
    assert!(pipeline.lifecycles().iter().all(|&(_, state)| state == Lifecycle::Cancelled));
}

#[test]
fn closing_the_head_closes_every_stage_once ()
{
    let closed = Rc::new(RefCell::new(vec![]));
    let on_close = |name: &'static str| {
        let closed = closed.clone();
        move || closed.borrow_mut().push(name)
    };
    let pipeline =
        PipelineBuilder::sink(Collect::<String>::new().finally(on_close("sink")))
            .stage(|downstream| {
                Retain::new(|line: &String| line.contains("ERROR"), downstream)
                    .finally(on_close("filter"))
            })
            .prime()
            .unwrap()
    ;
    pipeline.push("ERROR x".into()).unwrap();
    pipeline.close_chain().unwrap();
    assert_eq!(*closed.borrow(), ["sink", "filter"]);

    // Closing again is refused, and does not re-run any cleanup.
    assert_eq!(
        pipeline.close_chain(),
        Err(Error::Exhausted {
            operation: Operation::CloseChain,
            state: Lifecycle::Cancelled,
        }),
    );
    assert_eq!(closed.borrow().len(), 2);
}

#[test]
fn pushing_after_close_is_exhausted ()
{
    let pipeline = PipelineBuilder::sink(Collect::<u32>::new()).prime().unwrap();
    pipeline.push(1).unwrap();
    pipeline.close_chain().unwrap();
    assert_eq!(
        pipeline.push(2),
        Err(Error::Exhausted {
            operation: Operation::Push,
            state: Lifecycle::Cancelled,
        }),
    );
}

#[test]
fn unprimed_stage_refuses_pushes ()
{
    let stage = pipeline::stage_handle(Collect::<u32>::new());
    match pipeline::push(&stage, 1) {
        | Err(err) => assert!(err.is_invalid_state()),
        | Ok(outcome) => panic!("unexpected {:?}", outcome),
    }
}

#[test]
fn a_closed_downstream_fails_its_upstream ()
{
    let seen = Rc::new(RefCell::new(vec![]));
    let builder = PipelineBuilder::sink(Collect::<u32>::new());
    let sink = Downstream::new(builder.head());
    let pipeline =
        builder
            .stage(|downstream| Inspect::new(
                {
                    let seen = seen.clone();
                    move |&n: &u32| seen.borrow_mut().push(n)
                },
                downstream,
            ))
            .prime()
            .unwrap()
    ;

    // Close the sink only, behind the head's back.
    sink.close_chain().unwrap();
    match pipeline.push(1) {
        | Ok(SuspensionOutcome::Failed(signal)) => assert_eq!(
            signal.runtime_error(),
            Some(&Error::Exhausted {
                operation: Operation::Push,
                state: Lifecycle::Cancelled,
            }),
        ),
        | other => panic!("unexpected {:?}", other),
    }
    assert_eq!(*seen.borrow(), [1]);
    assert_eq!(
        pipeline.lifecycles(),
        [("stage#1", Lifecycle::Failed), ("sink", Lifecycle::Cancelled)],
    );
    assert!(pipeline.run(vec![2]).is_err());
}

#[test]
fn an_unprimed_downstream_is_reported_through_its_upstream ()
{
    let sink = pipeline::stage_handle(Collect::<u32>::new());
    let head = pipeline::stage_handle(Retain::new(|_: &u32| true, Downstream::new(&sink)));
    head.borrow_mut().start().unwrap();

    let signal = match pipeline::push(&head, 1) {
        | Ok(SuspensionOutcome::Failed(signal)) => signal,
        | other => panic!("unexpected {:?}", other),
    };
    assert!(matches!(signal.kind(), SignalKind::Runtime(_)));
    assert_eq!(
        signal.runtime_error(),
        Some(&Error::InvalidState {
            operation: Operation::Push,
            state: Lifecycle::Created,
        }),
    );
    assert_eq!(head.borrow().lifecycle(), Lifecycle::Failed);

    // Pushing everything stops at that failure, which still tells what went
    // wrong downstream.
    let head = pipeline::stage_handle(Retain::new(|_: &u32| true, Downstream::new(&sink)));
    head.borrow_mut().start().unwrap();
    let err = pipeline::push_all(vec![1, 2], &head).unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn dropped_pipeline_leaves_dangling_downstreams_harmless ()
{
    let builder = PipelineBuilder::sink(Collect::<u32>::new());
    let downstream = Downstream::new(builder.head());
    let pipeline = builder.prime().unwrap();
    assert_eq!(downstream.push(1), Ok(SuspensionOutcome::Produced(())));
    drop(pipeline);
    // A stage that is gone reads as cancelled.
    assert_eq!(
        downstream.push(2),
        Err(Error::Exhausted {
            operation: Operation::Push,
            state: Lifecycle::Cancelled,
        }),
    );
    assert_eq!(downstream.close_chain(), Ok(()));
}

/// A push target answering every push: whoever discards the outcomes of
/// those pushes loses the answers.
#[test]
fn discarded_answers_are_lost ()
{
    let mut average = RunningAverage::new().into_resumable();
    assert_eq!(average.start(), Ok(SuspensionOutcome::Produced(None)));
    for x in [10.0, 20.0] {
        let _ = average.push(x);
    }
    // Only the last answer is seen, and nothing can bring back the others.
    assert_eq!(average.push(30.0), Ok(SuspensionOutcome::Produced(Some(20.0))));
    assert_eq!(average.produced_count(), 4);
    average.cancel().unwrap();
    assert_eq!(average.lifecycle(), Lifecycle::Cancelled);
}
