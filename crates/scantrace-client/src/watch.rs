use crate::cancel::CancelToken;
use crate::poller::{PollConfig, ScanOutcome, ScanSnapshot, watch_scan};
use crate::transport::ScanTransport;
use scantrace_types::ScanId;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::Stream;

/// Event delivered to a subscribed consumer.
#[derive(Debug)]
pub enum WatchEvent {
    /// Fresh snapshot after a successful poll
    Update(ScanSnapshot),

    /// The watch ended; no further events follow
    Finished(ScanOutcome),
}

/// Subscription surface for event-loop hosts: the poll loop runs as a
/// background task and its updates arrive as a `Stream`.
pub struct ScanStream {
    receiver: tokio::sync::mpsc::UnboundedReceiver<WatchEvent>,
}

impl ScanStream {
    /// Poll for the next event (non-blocking).
    ///
    /// Returns `None` if no event is available immediately.
    pub fn try_next(&mut self) -> Option<WatchEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for ScanStream {
    type Item = WatchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Start watching a scan and return its event stream.
///
/// The stream yields zero or more `Update`s followed by exactly one
/// `Finished`, then ends. Use the `cancel` token to detach early; dropping
/// the stream alone lets the background task run to its terminal state.
pub fn watch_scan_stream(
    transport: Arc<dyn ScanTransport>,
    scan_id: ScanId,
    config: PollConfig,
    cancel: CancelToken,
) -> ScanStream {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::spawn(async move {
        let updates = tx.clone();
        let outcome = watch_scan(transport.as_ref(), &scan_id, config, cancel, |snapshot| {
            let _ = updates.send(WatchEvent::Update(snapshot));
        })
        .await;

        let _ = tx.send(WatchEvent::Finished(outcome));
    });

    ScanStream { receiver: rx }
}
