use_prelude!();

use ::std::{
    fs,
    path::PathBuf,
    vec,
};

use crate::sources::LineReader;

/// The files of a directory whose name matches a wildcard pattern, in
/// lexicographic order of their names.
///
/// The directory is listed on the first step. Patterns understand `*` (any
/// run of characters) and `?` (exactly one character); the default is
/// `*.log`.
#[derive(Debug)]
pub
struct LogFiles {
    dir: PathBuf,
    pattern: String,
    pending: Option<vec::IntoIter<PathBuf>>,
}

impl LogFiles {
    /// The `*.log` files of `dir`.
    pub
    fn new (dir: impl Into<PathBuf>)
      -> Self
    {
        Self {
            dir: dir.into(),
            pattern: "*.log".into(),
            pending: None,
        }
    }

    /// Use `pattern` rather than `*.log`.
    pub
    fn pattern (self: Self, pattern: impl Into<String>)
      -> Self
    {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }

    fn list (self: &'_ Self)
      -> Result<Vec<PathBuf>, FailureSignal>
    {
        let mut matching = vec![];
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file().not() {
                continue;
            }
            let name = entry.file_name();
            if wildcard_match(&self.pattern, &name.to_string_lossy()) {
                matching.push(entry.path());
            }
        }
        matching.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        ::tracing::debug!(
            dir = %self.dir.display(),
            pattern = %self.pattern,
            count = matching.len(),
            "listed files",
        );
        Ok(matching)
    }
}

impl Coroutine for LogFiles {
    type Yield = PathBuf;
    type ResumeArg = ();
    type Return = ();

    fn resume_with (self: &'_ mut Self, input: Resumption<()>)
      -> GeneratorState<PathBuf>
    {
        match input {
            | Resumption::Start => match self.list() {
                | Ok(paths) => self.pending = Some(paths.into_iter()),
                | Err(signal) => return GeneratorState::Raised(signal),
            },
            | Resumption::Value(_) => {},
            | Resumption::Failure(signal) => return GeneratorState::Raised(signal),
            | Resumption::Cancel => return GeneratorState::cancelled(),
        }
        match self.pending.as_mut().and_then(Iterator::next) {
            | Some(path) => GeneratorState::Yielded(path),
            | None => GeneratorState::Returned(()),
        }
    }
}

/// Every line of every file of `dir` matching `pattern`, as one sequence:
/// files in name order, lines in file order. Each file is only opened once
/// the previous one has been fully read (and closed).
pub
fn log_lines (dir: impl Into<PathBuf>, pattern: &'_ str)
  -> impl Coroutine<Yield = String, ResumeArg = (), Return = ()>
{
    LogFiles::new(dir)
        .pattern(pattern)
        .flat_map(|path| LineReader::new(path))
}

/// The lines containing `ERROR` among the `*.log` files of `dir`.
pub
fn error_lines (dir: impl Into<PathBuf>)
  -> impl Coroutine<Yield = String, ResumeArg = (), Return = ()>
{
    log_lines(dir, "*.log")
        .filter_yield(|line| line.contains("ERROR"))
}

/// `*` matches any run of characters, `?` exactly one.
fn wildcard_match (pattern: &'_ str, name: &'_ str)
  -> bool
{
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    // Position of the last `*` seen, and of the name when it was seen.
    let mut backtrack: Option<(usize, usize)> = None;
    while n < name.len() {
        match pattern.get(p) {
            | Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            },
            | Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            },
            | _ => match backtrack {
                | Some((star, at)) => {
                    p = star + 1;
                    n = at + 1;
                    backtrack = Some((star, at + 1));
                },
                | None => return false,
            },
        }
    }
    pattern[p ..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::wildcard_match;

    #[test]
    fn wildcards ()
    {
        assert!(wildcard_match("*.log", "app-2026-02-10.log"));
        assert!(wildcard_match("*.log", ".log"));
        assert!(wildcard_match("app-????-*.log", "app-2026-02-11.log"));
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("a*b*c", "axxbyyc"));
        assert!(!wildcard_match("*.log", "app.log.gz"));
        assert!(!wildcard_match("app-?.log", "app-12.log"));
        assert!(!wildcard_match("?", ""));
    }
}
