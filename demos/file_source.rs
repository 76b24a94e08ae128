//! Example: Watching a snapshot file
//!
//! Polls a JSON snapshot (as written by `statuswatch --export` or any tool
//! producing the same format) and prints each monitor with its history strip
//! whenever the file changes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example file_source -- path/to/snapshot.json
//! ```

use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use statuswatch::{DataSource, FileSource};
use statuswatch_types::{Bucket, HistoryBucketizer, StatusSnapshot};

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example file_source -- <path-to-snapshot.json>");
        eprintln!();
        eprintln!("The file should contain a snapshot in the format:");
        eprintln!(r#"  {{"version": {{"major": 1, "minor": 0}}, "monitors": [...]}}"#);
        std::process::exit(1);
    });

    println!("Watching file: {}", path);
    println!("Press Ctrl+C to stop\n");

    let mut source = FileSource::new(&path);
    let bucketizer = HistoryBucketizer::default();

    loop {
        match source.poll() {
            Some(snapshot) => print_snapshot(&snapshot, &bucketizer),
            None => {
                if let Some(err) = source.error() {
                    eprint!("\rError: {}  ", err);
                } else {
                    print!("\rWaiting for changes...  ");
                }
                io::stdout().flush().unwrap();
            }
        }

        thread::sleep(Duration::from_millis(500));
    }
}

fn print_snapshot(snapshot: &StatusSnapshot, bucketizer: &HistoryBucketizer) {
    println!("Snapshot '{}' with {} monitors:", snapshot.title, snapshot.len());
    for monitor in &snapshot.monitors {
        let strip: String = bucketizer
            .bucketize(monitor.series.samples())
            .iter()
            .map(|bucket| match bucket {
                Bucket::Sample(s) => s.status.symbol(),
                Bucket::Empty => "·",
            })
            .collect();
        println!(
            "  - {:<24} {:>3} heartbeats  {}",
            monitor.name,
            monitor.series.len(),
            strip
        );
    }
    println!();
}
