//! End-to-end tests: watcher ingestion through prefix query, at the library
//! surface and through the CLI binary.

use std::fs;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use lexi::config::Config;
use lexi::index::PrefixIndex;
use lexi::live::LiveMatchChannel;
use lexi::watcher::DirectoryWatcher;
use tempfile::TempDir;

fn test_config() -> Config {
    Config {
        poll_interval_secs: 1,
        max_tracked_files: 100,
        max_watchers: 100,
        color: false,
    }
}

fn watcher_for(dir: &TempDir) -> (DirectoryWatcher, Arc<PrefixIndex>) {
    let index = Arc::new(PrefixIndex::new());
    let live = Arc::new(LiveMatchChannel::new());
    let watcher = DirectoryWatcher::new(
        dir.path().to_path_buf(),
        Arc::clone(&index),
        live,
        &test_config(),
    );
    (watcher, index)
}

#[test]
fn test_two_files_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "dog door").unwrap();
    fs::write(dir.path().join("b.txt"), "cat").unwrap();

    let (mut watcher, index) = watcher_for(&dir);
    watcher.scan_cycle().unwrap();

    let mut results = index.query_by_prefix("do");
    results.sort();
    assert_eq!(results, vec!["dog", "door"]);

    assert!(index.query_by_prefix("cow").is_empty());
    assert_eq!(index.word_count(), 3);
}

#[test]
fn test_appended_word_appears_after_modification() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, "dog").unwrap();

    let (mut watcher, index) = watcher_for(&dir);
    watcher.scan_cycle().unwrap();
    assert_eq!(index.query_by_prefix("do"), vec!["dog"]);

    // Append and push the mtime forward explicitly, so the test does not
    // depend on filesystem timestamp granularity.
    fs::write(&file, "dog door").unwrap();
    let handle = fs::File::options().write(true).open(&file).unwrap();
    handle
        .set_modified(SystemTime::now() + Duration::from_secs(10))
        .unwrap();
    drop(handle);

    watcher.scan_cycle().unwrap();
    let mut results = index.query_by_prefix("do");
    results.sort();
    assert_eq!(results, vec!["dog", "door"]);
}

#[test]
fn test_background_watcher_thread_picks_up_files() {
    let dir = TempDir::new().unwrap();
    let (watcher, index) = watcher_for(&dir);

    // Fire-and-forget, as the service spawns it. The thread runs until the
    // test process exits.
    std::thread::spawn(move || watcher.run());

    fs::write(dir.path().join("late.txt"), "tardigrade").unwrap();

    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        if index.contains("tardigrade") {
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("word never ingested by background watcher");
}

fn spawn_cli(dir: &TempDir) -> Child {
    Command::new(env!("CARGO_BIN_EXE_lexi"))
        .arg("--no-color")
        .arg("--poll-secs")
        .arg("1")
        .arg(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn lexi")
}

#[test]
fn test_cli_query_and_stop() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "dog door").unwrap();
    fs::write(dir.path().join("b.txt"), "cat").unwrap();

    let mut child = spawn_cli(&dir);
    let mut stdin = child.stdin.take().unwrap();

    // Give the first poll cycle time to ingest both files.
    std::thread::sleep(Duration::from_secs(2));
    writeln!(stdin, "do").unwrap();
    writeln!(stdin, "cow").unwrap();
    writeln!(stdin, "stop").unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("lexi did not exit");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dog"), "missing dog in: {stdout}");
    assert!(stdout.contains("door"), "missing door in: {stdout}");
    assert!(
        stdout.contains("no words with prefix cow yet"),
        "missing no-match diagnostic in: {stdout}"
    );
    assert!(stdout.contains("stopping with"), "missing shutdown line");
}

#[test]
fn test_cli_live_tail_streams_new_words() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "dog").unwrap();

    let mut child = spawn_cli(&dir);
    let mut stdin = child.stdin.take().unwrap();

    std::thread::sleep(Duration::from_secs(2));
    // Arm the live tail, then drop a matching word into the directory.
    writeln!(stdin, "do").unwrap();
    std::thread::sleep(Duration::from_millis(300));
    fs::write(dir.path().join("late.txt"), "dolphin unrelated").unwrap();
    std::thread::sleep(Duration::from_millis(2500));
    writeln!(stdin, "stop").unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("lexi did not exit");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("dolphin"),
        "live match never streamed in: {stdout}"
    );
}

#[test]
fn test_cli_add_directory_command() {
    let initial = TempDir::new().unwrap();
    let added = TempDir::new().unwrap();
    fs::write(added.path().join("w.txt"), "walrus").unwrap();

    let mut child = spawn_cli(&initial);
    let mut stdin = child.stdin.take().unwrap();

    writeln!(stdin, "add-directory:{}", added.path().display()).unwrap();
    std::thread::sleep(Duration::from_secs(2));
    writeln!(stdin, "wal").unwrap();
    writeln!(stdin, "stop").unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("lexi did not exit");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("walrus"), "missing walrus in: {stdout}");
}
