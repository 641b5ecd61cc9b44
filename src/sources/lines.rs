use_prelude!();

use ::std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

/// The lines of a file, read lazily.
///
/// The file is opened on the first step and owned by the computation until
/// its cleanup block releases it, on every exit path. Lines are decoded
/// lossily (invalid UTF-8 becomes `U+FFFD`) and come without their line
/// terminator.
#[derive(Debug)]
pub
struct LineReader {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    buf: Vec<u8>,
}

impl LineReader {
    /// The lines of the file at `path`, not opened yet.
    pub
    fn new (path: impl Into<PathBuf>)
      -> Self
    {
        Self {
            path: path.into(),
            reader: None,
            buf: Vec::new(),
        }
    }

    /// The path of the file read.
    #[inline]
    pub
    fn path (self: &'_ Self)
      -> &'_ Path
    {
        &self.path
    }

    /// Whether the file is currently held open.
    #[inline]
    pub
    fn is_open (self: &'_ Self)
      -> bool
    {
        self.reader.is_some()
    }

    fn open (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        let file = File::open(&self.path).map_err(|err| {
            FailureSignal::new(
                "IoError",
                format!("cannot open {}: {}", self.path.display(), err),
            )
        })?;
        ::tracing::debug!(path = %self.path.display(), "file opened");
        self.reader = Some(BufReader::new(file));
        Ok(())
    }

    fn read_line (self: &'_ mut Self)
      -> Result<Option<String>, FailureSignal>
    {
        let reader = match self.reader.as_mut() {
            | Some(it) => it,
            | None => return Ok(None),
        };
        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl Coroutine for LineReader {
    type Yield = String;
    type ResumeArg = ();
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<()>)
      -> GeneratorState<String>
    {
        match input {
            | Resumption::Start => if let Err(signal) = self.open() {
                return GeneratorState::Raised(signal);
            },
            | Resumption::Value(_) => {},
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        match self.read_line() {
            | Ok(Some(line)) => GeneratorState::Yielded(line),
            | Ok(None) => GeneratorState::Returned(()),
            | Err(signal) => GeneratorState::Raised(signal),
        }
    }

    fn cleanup (self: &'_ mut Self)
      -> Result<(), FailureSignal>
    {
        if self.reader.take().is_some() {
            ::tracing::debug!(path = %self.path.display(), "file closed");
        }
        Ok(())
    }
}
