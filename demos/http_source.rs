//! Example: Polling a status page over HTTP
//!
//! Spawns an [`HttpSource`] for a status page and prints a one-line summary
//! every time a new snapshot arrives. This is the same poller the dashboard
//! uses, without the terminal UI.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example http_source -- https://status.example.com/status/main
//! cargo run --example http_source -- https://status.example.com main
//! ```

use std::env;
use std::time::Duration;

use statuswatch::{DataSource, HttpSource, MonitorData};
use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;

#[tokio::main]
async fn main() {
    let mut args = env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("Usage: cargo run --example http_source -- <status-page-url> [slug]");
        std::process::exit(1);
    };

    let mut builder = UptimeKumaAdapter::builder()
        .endpoint(url)
        .timeout(Duration::from_secs(10));
    if let Some(slug) = args.next() {
        builder = builder.slug(slug);
    }

    let adapter = match builder.build() {
        Ok(adapter) => adapter,
        Err(e) => {
            eprintln!("Invalid status page: {}", e);
            std::process::exit(1);
        }
    };

    let mut source = HttpSource::spawn(adapter, Duration::from_secs(30));
    println!("Polling {} every 30s", source.description());
    println!("Press Ctrl+C to stop\n");

    let mut last_error = None;
    loop {
        if let Some(snapshot) = source.poll() {
            let data = MonitorData::from_snapshot(snapshot);
            let counts = data.counts();
            println!(
                "{}: {} monitors, worst status {}",
                if data.title.is_empty() { "status page" } else { data.title.as_str() },
                counts.total(),
                counts.worst().map(|s| s.label()).unwrap_or("none")
            );
            for row in &data.monitors {
                println!("  {} {}", row.status.symbol(), row.name);
            }
        }

        let err = source.error().map(str::to_string);
        if err.is_some() && err != last_error {
            eprintln!("Error: {}", err.as_deref().unwrap_or_default());
        }
        last_error = err;

        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
