//! Console output for query results, live matches, and watcher diagnostics.
//!
//! Colors are cosmetic: every function takes a `color` switch and degrades to
//! plain text. Watchers and the query service write to the same stdout; lines
//! are written whole, so interleaving stays line-granular.

use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Header line printed before every synchronous query.
pub fn print_search_header(prefix: &str, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write!(out, "searching for prefix -> ")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(out, "{}", prefix)?;
    out.reset()
}

/// One result word per line.
pub fn print_query_results(words: &[String], color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    for word in words {
        writeln!(out, "{}", word)?;
    }
    Ok(())
}

/// Diagnostic for a query with no stored completions.
pub fn print_no_match(prefix: &str, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(out, "no words with prefix {} yet", prefix)?;
    out.flush()
}

/// A freshly ingested word matching the active prefix.
pub fn print_live_match(word: &str, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", word)?;
    out.reset()
}

/// A watcher started tracking a new file.
pub fn print_file_added(path: &Path, size: u64, color: bool) -> io::Result<()> {
    print_file_event("added new", path, size, color)
}

/// A tracked file's modification time changed.
pub fn print_file_modified(path: &Path, size: u64, color: bool) -> io::Result<()> {
    print_file_event("modified", path, size, color)
}

fn print_file_event(event: &str, path: &Path, size: u64, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write!(out, "{}: ", event)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
    write!(out, "{}", path.display())?;
    out.reset()?;
    writeln!(out, "   size: {}", size)
}

/// A watcher's tracked-file table is full; the file will be re-read every
/// cycle but never tracked.
pub fn print_capacity_exceeded(dir: &Path, capacity: usize, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(
        out,
        "can't track more than {} files in folder {}",
        capacity,
        dir.display()
    )
}

/// A file could not be opened or fully read; it is left unparsed (new files
/// stay untracked, modified files keep their stale record) and is retried on
/// a later poll cycle.
pub fn print_file_unreadable(path: &Path, err: &io::Error, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(out, "{} can't be opened: {}", path.display(), err)
}

/// A watched directory became unreadable; its watcher is exiting.
pub fn print_watcher_exiting(dir: &Path, err: &io::Error, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(
        out,
        "folder {} is unreadable ({}), watcher exiting",
        dir.display(),
        err
    )
}

/// The watcher cap was hit; the add command is rejected.
pub fn print_watcher_cap(cap: usize, dir: &Path, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(
        out,
        "watcher limit of {} reached, not watching {}",
        cap,
        dir.display()
    )
}

/// Summary line printed on shutdown.
pub fn print_shutdown(word_count: usize, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    writeln!(out, "stopping with {} words indexed", word_count)
}
