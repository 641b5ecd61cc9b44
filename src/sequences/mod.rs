//! Ready-made computations.

pub use self::{
    averaging::RunningAverage,
    counter::{CounterCommand, ResettableCounter},
    countdown::Countdown,
    palindrome::{is_palindrome, PalindromeSearch},
};

mod averaging;
mod counter;
mod countdown;
mod palindrome;
