//! Pipeline ends: they consume what is pushed into them.

use_prelude!();

/// A sink keeping everything pushed into it, in order.
#[derive(Debug)]
pub
struct Collect<T> {
    items: Collected<T>,
}

/// Read access to what a [`Collect`] sink received, usable after the sink has
/// been moved into its pipeline.
#[derive(Debug)]
pub
struct Collected<T> (
    Rc<RefCell<Vec<T>>>,
);

impl<T> Clone for Collected<T> {
    fn clone (self: &'_ Self)
      -> Self
    {
        Self(self.0.clone())
    }
}

impl<T> Collected<T> {
    /// How many items were collected.
    #[inline]
    pub
    fn len (self: &'_ Self)
      -> usize
    {
        self.0.borrow().len()
    }

    /// Whether nothing was collected yet.
    #[inline]
    pub
    fn is_empty (self: &'_ Self)
      -> bool
    {
        self.0.borrow().is_empty()
    }

    /// A copy of the collected items.
    pub
    fn to_vec (self: &'_ Self)
      -> Vec<T>
    where
        T : Clone,
    {
        self.0.borrow().clone()
    }

    /// Move out everything collected so far.
    pub
    fn take (self: &'_ Self)
      -> Vec<T>
    {
        ::core::mem::take(&mut *self.0.borrow_mut())
    }
}

impl<T> Collect<T> {
    /// An empty sink.
    pub
    fn new ()
      -> Self
    {
        Self {
            items: Collected(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    /// A handle on the collected items.
    #[inline]
    pub
    fn items (self: &'_ Self)
      -> Collected<T>
    {
        self.items.clone()
    }
}

impl<T> Default for Collect<T> {
    fn default ()
      -> Self
    {
        Self::new()
    }
}

impl<T> Coroutine for Collect<T> {
    type Yield = ();
    type ResumeArg = T;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<T>)
      -> GeneratorState<()>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(value)) => self.items.0.borrow_mut().push(value),
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::Returned(()),
        }
        GeneratorState::Yielded(())
    }
}

/// A sink handing everything pushed into it to `f`.
pub
struct ForEach<T, F> {
    f: F,
    _accepts: PhantomData<fn(T)>,
}

impl<T, F> ForEach<T, F>
where
    F : FnMut(T),
{
    /// A sink calling `f` on every pushed value.
    pub
    fn new (f: F)
      -> Self
    {
        Self {
            f,
            _accepts: PhantomData,
        }
    }
}

impl<T, F> Coroutine for ForEach<T, F>
where
    F : FnMut(T),
{
    type Yield = ();
    type ResumeArg = T;
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<T>)
      -> GeneratorState<()>
    {
        match input {
            | Resumption::Start | Resumption::Value(None) => {},
            | Resumption::Value(Some(value)) => (self.f)(value),
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::Returned(()),
        }
        GeneratorState::Yielded(())
    }
}
