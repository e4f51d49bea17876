use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log_view::{LogFormatter, LogTail};

fn append(path: &std::path::Path, text: &str) {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open for append");
    file.write_all(text.as_bytes()).expect("append");
}

#[test]
fn follow_emits_new_lines_once_and_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("openclaw.log");
    fs::write(&path, "one\ntwo\nthree\n").expect("seed log");

    let mut tail = LogTail::new(BufReader::new(File::open(&path).expect("open log")));
    let initial = tail.read_initial(2, true).expect("initial");
    assert_eq!(initial, vec!["two\n".to_string(), "three\n".to_string()]);

    append(&path, "four\nfi");
    assert_eq!(tail.read_available().expect("read"), vec!["four\n".to_string()]);
    append(&path, "ve\nsix\n");

    let stop = AtomicBool::new(false);
    let mut seen = Vec::new();
    tail.follow(&stop, Duration::from_millis(5), |line| {
        seen.push(line.to_string());
        if seen.len() == 2 {
            stop.store(true, Ordering::SeqCst);
        }
        Ok(())
    })
    .expect("follow");
    assert_eq!(seen, vec!["five\n".to_string(), "six\n".to_string()]);
    assert!(tail.read_available().expect("drained").is_empty());
}

#[test]
fn follow_returns_immediately_when_stopped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("idle.log");
    fs::write(&path, "").expect("seed log");
    let mut tail = LogTail::new(BufReader::new(File::open(&path).expect("open log")));
    let stop = AtomicBool::new(true);
    tail.follow(&stop, Duration::from_secs(60), |_| Ok(()))
        .expect("follow");
}

#[test]
fn tail_lines_format_through_formatter() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("app.log");
    fs::write(
        &path,
        concat!(
            r#"{"time":"2026-02-27T16:26:46.306Z","_meta":{"logLevelName":"ERROR"},"0":"gateway/canvas","1":"boom"}"#,
            "\n\n",
            "raw text\n",
        ),
    )
    .expect("write log");

    let mut tail = LogTail::new(BufReader::new(File::open(&path).expect("open log")));
    let mut formatter = LogFormatter::new(8).expect("formatter").with_color(false);
    let rendered: Vec<String> = tail
        .read_initial(20, false)
        .expect("tail")
        .iter()
        .filter_map(|line| formatter.format_line(line))
        .collect();
    assert_eq!(
        rendered,
        vec![
            "[2026-02-28 00:26:46] | [gateway] | ERROR | boom".to_string(),
            "└─ raw text".to_string(),
        ]
    );
}
