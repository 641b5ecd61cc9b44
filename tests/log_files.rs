#![cfg(feature = "fs")]

use {
    ::std::{
        cell::Cell,
        fs,
        path::Path,
        rc::Rc,
    },
    ::resumable::{
        prelude::*,
        sources::{error_lines, log_lines, LineReader, LogFiles},
    },
    ::tempfile::TempDir,
};

fn init_logging ()
{
    let _ = ::tracing_subscriber::fmt()
        .with_max_level(::tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
    ;
}

fn log_dir ()
  -> TempDir
{
    let dir = ::tempfile::tempdir().unwrap();
    let write = |name: &str, contents: &str| {
        fs::write(dir.path().join(name), contents).unwrap();
    };
    write("app-2026-02-11.log", "ERROR net down\r\nINFO back up\n");
    write("app-2026-02-10.log", "INFO boot\nERROR disk full\nINFO done");
    write("notes.txt", "ERROR not a log file\n");
    fs::create_dir(dir.path().join("archive.log")).unwrap();
    dir
}

fn file_names (dir: &'_ Path)
  -> Vec<String>
{
    LogFiles::new(dir)
        .into_resumable()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn files_are_listed_in_name_order ()
{
    init_logging();
    let dir = log_dir();
    assert_eq!(file_names(dir.path()), ["app-2026-02-10.log", "app-2026-02-11.log"]);
    assert_eq!(
        LogFiles::new(dir.path())
            .pattern("*.txt")
            .into_resumable()
            .count(),
        1,
    );
}

#[test]
fn lines_of_every_file_in_order ()
{
    init_logging();
    let dir = log_dir();
    assert_eq!(
        log_lines(dir.path(), "app-*.log").into_resumable().collect::<Vec<_>>(),
        ["INFO boot", "ERROR disk full", "INFO done", "ERROR net down", "INFO back up"],
    );
}

#[test]
fn only_error_lines ()
{
    init_logging();
    let dir = log_dir();
    assert_eq!(
        error_lines(dir.path()).into_resumable().collect::<Vec<_>>(),
        ["ERROR disk full", "ERROR net down"],
    );
}

#[test]
fn every_opened_file_gets_closed ()
{
    init_logging();
    let dir = log_dir();
    let opened = Rc::new(Cell::new(0));
    let closed = Rc::new(Cell::new(0));
    let mut lines =
        LogFiles::new(dir.path())
            .flat_map({
                let opened = opened.clone();
                let closed = closed.clone();
                move |path| {
                    opened.set(opened.get() + 1);
                    let closed = closed.clone();
                    LineReader::new(path).finally(move || closed.set(closed.get() + 1))
                }
            })
            .into_resumable()
    ;

    // Stop in the middle of the first file.
    assert_eq!(lines.next().as_deref(), Some("INFO boot"));
    assert_eq!((opened.get(), closed.get()), (1, 0));
    lines.cancel().unwrap();
    assert_eq!((opened.get(), closed.get()), (1, 1));

    // Read everything.
    let all = LogFiles::new(dir.path())
        .flat_map({
            let closed = closed.clone();
            move |path| {
                let closed = closed.clone();
                LineReader::new(path).finally(move || closed.set(closed.get() + 1))
            }
        })
        .into_resumable()
        .count()
    ;
    assert_eq!(all, 5);
    assert_eq!(closed.get(), 3);
}

#[test]
fn missing_file_fails ()
{
    init_logging();
    let dir = log_dir();
    let mut reader = LineReader::new(dir.path().join("missing.log")).into_resumable();
    match reader.start() {
        | Ok(SuspensionOutcome::Failed(signal)) => assert!(signal.is("IoError")),
        | other => panic!("unexpected {:?}", other),
    }
    assert_eq!(reader.lifecycle(), Lifecycle::Failed);
    assert!(!reader.body().is_open());
}

#[test]
fn missing_directory_fails ()
{
    init_logging();
    let dir = log_dir();
    let mut files = LogFiles::new(dir.path().join("nowhere")).into_resumable();
    assert_eq!(files.next(), None);
    assert!(files.failure().unwrap().is("IoError"));
}
