//! Finite, lazily-produced sequences to feed computations with: any iterator,
//! and (with the `fs` feature) the lines of files and the files of a
//! directory.

pub use self::iter::IterSource;
mod iter;

#[cfg(feature = "fs")]
pub use self::{
    files::{error_lines, log_lines, LogFiles},
    lines::LineReader,
};
#[cfg(feature = "fs")]
mod files;
#[cfg(feature = "fs")]
mod lines;
