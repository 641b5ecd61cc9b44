//! Push pipelines: chains of computations where each stage waits at its
//! suspension point for a value to be pushed into it, and itself pushes its
//! results into the next stage.
//!
//! ```rust
//! use ::resumable::pipeline::{Collect, PipelineBuilder, Retain};
//!
//! # fn main () -> ::resumable::Result<()> {
//! let sink = Collect::new();
//! let collected = sink.items();
//! let pipeline =
//!     PipelineBuilder::sink(sink)
//!         .stage(|downstream| Retain::new(|line: &String| line.contains("ERROR"), downstream))
//!         .prime()?
//! ;
//! pipeline.run(["INFO ok", "ERROR boom", "INFO ok2", "ERROR again"].map(String::from))?;
//! assert_eq!(collected.to_vec(), ["ERROR boom", "ERROR again"]);
//! # Ok(()) }
//! ```
//!
//! # Wiring
//!
//! Pipelines are built from the sink up, since every stage needs a reference
//! to its downstream when it is created. The [`Pipeline`] owns every stage;
//! a stage only holds a [`Downstream`], a non-owning reference to the next
//! stage.
//!
//! Every stage must be _primed_ (started up to its first suspension point)
//! before anything is pushed into it: [`PipelineBuilder::prime()`] does so,
//! sink first. Pushing into a stage that was not primed fails with
//! [`Error::InvalidState`].
//!
//! # Closing
//!
//! [`close_chain()`] cancels a stage. Each stage shipped here reacts to its
//! cancellation by closing its own downstream before its own cleanup
//! completes, so closing the head of a pipeline terminates every stage, once.
//!
//! # Lost values
//!
//! Pushing returns the [`SuspensionOutcome`] of the stage pushed into. Stages
//! shipped here produce `()`, so nothing is lost by ignoring it, but a target
//! that answers pushes with values (see
//! [`RunningAverage`][crate::sequences::RunningAverage]) hands its answers
//! back only through those outcomes: a caller that discards them drops the
//! answers, silently.

use_prelude!();

use ::std::borrow::Cow;

pub use self::{
    sinks::{Collect, Collected, ForEach},
    stages::{Inspect, MapStage, Retain},
};

mod sinks;
mod stages;

/// The body of a push stage or sink accepting `T`s.
pub
type StageBody<T> = BoxedCoroutine<'static, (), T>;

/// A stage, as owned by its pipeline.
pub
type StageHandle<T> = Rc<RefCell<Resumable<StageBody<T>>>>;

/// Wrap `body` into a stage handle.
pub
fn stage_handle<T, B> (body: B)
  -> StageHandle<T>
where
    B : 'static + Coroutine<Yield = (), ResumeArg = T, Return = ()>,
{
    Rc::new(RefCell::new(Resumable::new(body.boxed())))
}

/// Push `value` into `stage`: a [`resume(Some(value))`][Resumable::resume].
///
/// Fails with [`Error::ConcurrentAccess`] if `stage` is already busy (for
/// instance when a stage pushes, directly or not, into itself).
pub
fn push<T> (stage: &'_ StageHandle<T>, value: T)
  -> Result<SuspensionOutcome<()>>
{
    stage
        .try_borrow_mut()
        .map_err(|_| Error::ConcurrentAccess { operation: Operation::Push })?
        .push(value)
}

/// Cancel `stage`, which is expected to close its own downstream in turn.
pub
fn close_chain<T> (stage: &'_ StageHandle<T>)
  -> Result<()>
{
    stage
        .try_borrow_mut()
        .map_err(|_| Error::ConcurrentAccess { operation: Operation::CloseChain })?
        .cancel_as(Operation::CloseChain)
}

/// The source end of a pipeline: push every value into `target`, then close
/// the chain. Returns how many values were pushed.
///
/// Stops at the first failing push, without closing the chain (the failing
/// stage has already ended; the others end when their pipeline is dropped).
pub
fn push_all<T> (values: impl IntoIterator<Item = T>, target: &'_ StageHandle<T>)
  -> Result<usize>
{
    let mut pushed = 0;
    for value in values {
        match push(target, value)? {
            | SuspensionOutcome::Failed(signal) => return Err(signal.into()),
            | _ => pushed += 1,
        }
    }
    close_chain(target)?;
    Ok(pushed)
}

/// A stage's reference to the next stage down the pipeline.
///
/// It does not keep that stage alive: once its pipeline is gone, pushing
/// through it fails with [`Error::Exhausted`], and closing it does nothing.
/// How the stage ended is lost along with it, so such a push reports the
/// state [`Lifecycle::Cancelled`], meaning "gone": dropping a stage that was
/// still live cancels it.
pub
struct Downstream<T> {
    target: Weak<RefCell<Resumable<StageBody<T>>>>,
}

impl<T> Clone for Downstream<T> {
    fn clone (self: &'_ Self)
      -> Self
    {
        Self { target: self.target.clone() }
    }
}

impl<T> fmt::Debug for Downstream<T> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Downstream")
            .field("alive", &(self.target.strong_count() > 0))
            .finish()
    }
}

impl<T> Downstream<T> {
    /// A reference to `stage`, which does not keep it alive.
    pub
    fn new (stage: &'_ StageHandle<T>)
      -> Self
    {
        Self { target: Rc::downgrade(stage) }
    }

    /// [`push`] through this reference.
    ///
    /// A dropped target reports `Exhausted` in the `Cancelled` state, whatever
    /// it ended as.
    pub
    fn push (self: &'_ Self, value: T)
      -> Result<SuspensionOutcome<()>>
    {
        match self.target.upgrade() {
            | Some(stage) => push(&stage, value),
            | None => Err(Error::Exhausted {
                operation: Operation::Push,
                state: Lifecycle::Cancelled,
            }),
        }
    }

    /// [`close_chain`] through this reference.
    pub
    fn close_chain (self: &'_ Self)
      -> Result<()>
    {
        match self.target.upgrade() {
            | Some(stage) => close_chain(&stage),
            | None => Ok(()),
        }
    }

    /// Push `value` and require the downstream stage to take it, for use from
    /// a stage body: whatever went wrong becomes the signal to raise.
    pub
    fn forward (self: &'_ Self, value: T)
      -> Result<(), FailureSignal>
    {
        match self.push(value)? {
            | SuspensionOutcome::Failed(signal) => Err(signal),
            | SuspensionOutcome::Produced(()) | SuspensionOutcome::Completed(()) => Ok(()),
        }
    }

    /// Close the downstream stage as a stage's answer to its own
    /// cancellation: an already-ended downstream is fine, a failing one is
    /// re-raised.
    pub
    fn cascade_close<Yield, Return> (self: &'_ Self)
      -> GeneratorState<Yield, Return>
    {
        ::tracing::debug!("closing downstream stage");
        match self.close_chain() {
            | Ok(()) | Err(Error::Exhausted { .. }) => GeneratorState::cancelled(),
            | Err(err) => GeneratorState::Raised(err.into()),
        }
    }
}

/// What the pipeline needs from each of its stages, whatever they accept.
trait StageControl {
    fn prime (self: &'_ Self)
      -> Result<()>
    ;

    fn lifecycle (self: &'_ Self)
      -> Lifecycle
    ;
}

impl<T> StageControl for RefCell<Resumable<StageBody<T>>> {
    fn prime (self: &'_ Self)
      -> Result<()>
    {
        let mut stage =
            self.try_borrow_mut()
                .map_err(|_| Error::ConcurrentAccess { operation: Operation::Start })?
        ;
        match stage.start()? {
            | SuspensionOutcome::Produced(()) => Ok(()),
            | SuspensionOutcome::Completed(()) => Err(Error::Exhausted {
                operation: Operation::Start,
                state: stage.lifecycle(),
            }),
            | SuspensionOutcome::Failed(signal) => Err(signal.into()),
        }
    }

    fn lifecycle (self: &'_ Self)
      -> Lifecycle
    {
        self.try_borrow()
            .map_or(Lifecycle::Running, |stage| stage.lifecycle())
    }
}

struct Entry {
    name: Cow<'static, str>,
    control: Rc<dyn StageControl>,
}

/// Wires a pipeline from its sink up to its head. See the
/// [module docs][self].
pub
struct PipelineBuilder<T> {
    head: StageHandle<T>,
    /// Sink first.
    stages: Vec<Entry>,
}

impl<T : 'static> PipelineBuilder<T> {
    /// Start from the last stage of the pipeline.
    pub
    fn sink<B> (body: B)
      -> Self
    where
        B : 'static + Coroutine<Yield = (), ResumeArg = T, Return = ()>,
    {
        let head = stage_handle(body);
        let control: Rc<dyn StageControl> = head.clone();
        Self {
            head,
            stages: vec![Entry { name: "sink".into(), control }],
        }
    }

    /// Add a stage in front of the current head, built from a reference to
    /// that head.
    pub
    fn stage<S : 'static, B> (self: Self, make: impl FnOnce(Downstream<T>) -> B)
      -> PipelineBuilder<S>
    where
        B : 'static + Coroutine<Yield = (), ResumeArg = S, Return = ()>,
    {
        let Self { head, mut stages } = self;
        let new_head = stage_handle(make(Downstream::new(&head)));
        let control: Rc<dyn StageControl> = new_head.clone();
        stages.push(Entry {
            name: format!("stage#{}", stages.len()).into(),
            control,
        });
        PipelineBuilder { head: new_head, stages }
    }

    /// Name the current head stage (for [`Pipeline::lifecycles`] and logs).
    pub
    fn named (mut self: Self, name: impl Into<Cow<'static, str>>)
      -> Self
    {
        if let Some(head) = self.stages.last_mut() {
            head.name = name.into();
        }
        self
    }

    /// The current head stage, not primed yet.
    #[inline]
    pub
    fn head (self: &'_ Self)
      -> &'_ StageHandle<T>
    {
        &self.head
    }

    /// Prime every stage, sink first.
    pub
    fn prime (self: Self)
      -> Result<Pipeline<T>>
    {
        for entry in &self.stages {
            ::tracing::debug!(stage = %entry.name, "priming");
            entry.control.prime()?;
        }
        let Self { head, mut stages } = self;
        stages.reverse();
        Ok(Pipeline { head, stages })
    }
}

/// A primed chain of stages, ready to be pushed into.
pub
struct Pipeline<T> {
    head: StageHandle<T>,
    /// Head first.
    stages: Vec<Entry>,
}

impl<T> Pipeline<T> {
    /// [`push`] into the head stage.
    #[inline]
    pub
    fn push (self: &'_ Self, value: T)
      -> Result<SuspensionOutcome<()>>
    {
        push(&self.head, value)
    }

    /// [`close_chain`] from the head stage.
    #[inline]
    pub
    fn close_chain (self: &'_ Self)
      -> Result<()>
    {
        close_chain(&self.head)
    }

    /// [`push_all`] into the head stage.
    #[inline]
    pub
    fn run (self: &'_ Self, values: impl IntoIterator<Item = T>)
      -> Result<usize>
    {
        push_all(values, &self.head)
    }

    /// The head stage.
    #[inline]
    pub
    fn head (self: &'_ Self)
      -> &'_ StageHandle<T>
    {
        &self.head
    }

    /// Every stage's name and state, head first.
    pub
    fn lifecycles (self: &'_ Self)
      -> Vec<(&'_ str, Lifecycle)>
    {
        self.stages
            .iter()
            .map(|entry| (&*entry.name, entry.control.lifecycle()))
            .collect()
    }
}
