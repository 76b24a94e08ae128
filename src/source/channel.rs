//! Channel-based data source.
//!
//! Receives status snapshots via a tokio watch channel. A watch channel only
//! keeps the newest value, which is exactly the replace-not-append behavior
//! the dashboard wants: a slow UI never sees stale intermediate snapshots.

use tokio::sync::watch;

use super::{DataSource, StatusSnapshot};

/// A data source that receives status snapshots via a channel.
///
/// The producer (an HTTP poller, a test, an embedding application) sends
/// complete snapshots through the channel, and this source hands the
/// latest one to the TUI.
///
/// # Example
///
/// ```
/// use statuswatch::{ChannelSource, DataSource};
/// use statuswatch_types::StatusSnapshot;
///
/// let (tx, mut source) = ChannelSource::create("embedded");
/// assert!(source.poll().is_none());
///
/// tx.send(Some(StatusSnapshot::builder().title("Embedded").build())).unwrap();
/// assert_eq!(source.poll().unwrap().title, "Embedded");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<StatusSnapshot>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    pub fn new(receiver: watch::Receiver<Option<StatusSnapshot>>, source_description: &str) -> Self {
        let mut receiver = receiver;
        // Hand out whatever is already in the channel on the first poll
        receiver.mark_changed();
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// The channel starts out empty (`None`), so the first poll yields
    /// nothing until a snapshot is sent.
    pub fn create(source_description: &str) -> (watch::Sender<Option<StatusSnapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }

    /// Replace the description shown in the status bar.
    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        if !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }
        self.receiver.borrow_and_update().clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Producers report their own errors
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuswatch_types::Status;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Nothing has been sent yet
        assert!(source.poll().is_none());
        assert!(source.poll().is_none());

        let snapshot = StatusSnapshot::builder()
            .monitor(1, "web", |m| m.sample(1, Status::Up, |s| s))
            .build();
        tx.send(Some(snapshot)).unwrap();

        let received = source.poll().unwrap();
        assert_eq!(received.len(), 1);

        // No change, so poll returns None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_keeps_only_latest() {
        let (tx, mut source) = ChannelSource::create("test");

        for title in ["first", "second", "third"] {
            tx.send(Some(StatusSnapshot::builder().title(title).build())).unwrap();
        }

        assert_eq!(source.poll().unwrap().title, "third");
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_returns_existing_value() {
        let (tx, rx) = watch::channel(Some(StatusSnapshot::builder().title("ready").build()));
        let mut source = ChannelSource::new(rx, "prefilled");

        assert_eq!(source.description(), "channel: prefilled");
        assert_eq!(source.poll().unwrap().title, "ready");
        drop(tx);
        assert!(source.poll().is_none());
    }
}
