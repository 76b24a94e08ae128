//! HTTP polling data source.
//!
//! Spawns a background task that collects the status page on a fixed
//! interval and publishes each snapshot through a [`ChannelSource`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{ChannelSource, DataSource, StatusSnapshot};

/// A data source that polls a status page over HTTP.
///
/// Each tick fetches the complete page and replaces the previous snapshot.
/// Failed fetches keep the last good snapshot on screen and surface the
/// error through [`DataSource::error`].
///
/// Must be created from within a tokio runtime. Dropping the source stops
/// the poller.
#[derive(Debug)]
pub struct HttpSource {
    inner: ChannelSource,
    last_error: Arc<Mutex<Option<String>>>,
    error_seen: Option<String>,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
}

impl HttpSource {
    /// Spawn a poller for `adapter` that fetches every `interval`.
    ///
    /// The first fetch starts immediately.
    pub fn spawn(adapter: UptimeKumaAdapter, interval: Duration) -> Self {
        let (tx, mut inner) = ChannelSource::create(adapter.page().slug());
        inner.set_description(format!("http: {}", adapter.page()));

        let last_error = Arc::new(Mutex::new(None));
        let wake = Arc::new(Notify::new());

        let task = tokio::spawn(poll_loop(
            adapter,
            interval,
            tx,
            Arc::clone(&last_error),
            Arc::clone(&wake),
        ));

        Self {
            inner,
            last_error,
            error_seen: None,
            wake,
            task,
        }
    }
}

async fn poll_loop(
    adapter: UptimeKumaAdapter,
    interval: Duration,
    tx: watch::Sender<Option<StatusSnapshot>>,
    last_error: Arc<Mutex<Option<String>>>,
    wake: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(100)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(page = %adapter.page(), ?interval, "starting status page poller");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = wake.notified() => {
                debug!("manual refresh requested");
                ticker.reset();
            }
        }

        match adapter.collect().await {
            Ok(snapshot) => {
                *last_error.lock() = None;
                if tx.send(Some(snapshot)).is_err() {
                    // Receiver dropped
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "status page poll failed");
                *last_error.lock() = Some(e.to_string());
            }
        }
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        self.error_seen = self.last_error.lock().clone();
        self.inner.poll()
    }

    fn refresh(&mut self) {
        self.wake.notify_one();
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn error(&self) -> Option<&str> {
        self.error_seen.as_deref()
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}
