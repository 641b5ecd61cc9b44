use_prelude!();

/// Any iterator, as a computation producing its items and then completing.
#[derive(Debug, Clone)]
pub
struct IterSource<I> {
    iter: I,
}

impl<I : Iterator> IterSource<I> {
    /// The items of `iterable`.
    pub
    fn new (iterable: impl IntoIterator<IntoIter = I>)
      -> Self
    {
        Self {
            iter: iterable.into_iter(),
        }
    }
}

impl<I : Iterator> Coroutine for IterSource<I> {
    type Yield = I::Item;
    type ResumeArg = ();
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<()>)
      -> GeneratorState<I::Item>
    {
        match input {
            | Resumption::Start | Resumption::Value(_) => {},
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        match self.iter.next() {
            | Some(item) => GeneratorState::Yielded(item),
            | None => GeneratorState::Returned(()),
        }
    }
}
