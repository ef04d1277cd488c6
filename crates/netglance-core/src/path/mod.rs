// ── Path event sources ──
//
// The seam between the monitor and whatever observes OS network paths.
// Sources push `PathUpdate`s; the monitor never polls them directly.

mod sysfs;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::model::PathUpdate;

pub use sysfs::SysfsPathSource;

/// A push-based stream of network path change events.
#[async_trait]
pub trait PathSource: Send {
    /// Wait for the next path change. `None` ends the monitor task.
    async fn next_update(&mut self) -> Option<PathUpdate>;
}

/// Create a channel-backed path source for embedding the monitor behind
/// an external path observer (or driving it from tests).
pub fn channel_source(capacity: usize) -> (mpsc::Sender<PathUpdate>, ChannelPathSource) {
    let (tx, rx) = mpsc::channel(capacity);
    (tx, ChannelPathSource { rx })
}

/// Path source fed through an mpsc channel.
pub struct ChannelPathSource {
    rx: mpsc::Receiver<PathUpdate>,
}

#[async_trait]
impl PathSource for ChannelPathSource {
    async fn next_update(&mut self) -> Option<PathUpdate> {
        self.rx.recv().await
    }
}
