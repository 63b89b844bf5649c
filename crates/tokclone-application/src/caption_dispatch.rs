//! Background caption requests.
//!
//! Each ticket becomes one spawned task that calls the caption service and
//! sends the result back over a channel. The owner of the feed drains the
//! channel on its own loop, so panel state is only touched there.

use std::sync::Arc;

use tokclone_core::caption::{CaptionResult, CaptionService};
use tokclone_core::feed::{CaptionTicket, PanelInstanceId};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// A finished caption request addressed to a panel instance.
#[derive(Debug, Clone)]
pub struct CaptionDelivery {
    pub instance: PanelInstanceId,
    pub video_id: String,
    pub result: CaptionResult,
}

/// Spawns caption requests and hands out their results.
pub struct CaptionDispatcher {
    service: Arc<dyn CaptionService>,
    tx: mpsc::UnboundedSender<CaptionDelivery>,
    rx: mpsc::UnboundedReceiver<CaptionDelivery>,
    in_flight: usize,
}

impl CaptionDispatcher {
    pub fn new(service: Arc<dyn CaptionService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Issues exactly one request for the ticket. Must run inside a tokio runtime.
    pub fn dispatch(&mut self, ticket: CaptionTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!(
            video_id = %ticket.video.id,
            instance = %ticket.instance,
            "Dispatching caption request"
        );

        tokio::spawn(async move {
            let video = ticket.video.clone();
            let request = tokio::spawn(async move { service.generate_caption(&video).await });
            // One delivery per ticket, even if the service panics.
            let result = match request.await {
                Ok(result) => result,
                Err(err) => {
                    error!(video_id = %ticket.video.id, error = %err, "Caption task failed");
                    CaptionResult::fallback()
                }
            };
            // The receiver lives as long as the dispatcher; a send error only
            // happens during shutdown.
            let _ = tx.send(CaptionDelivery {
                instance: ticket.instance,
                video_id: ticket.video.id,
                result,
            });
        });
    }

    /// Number of requests whose results have not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collects every result that is ready without waiting.
    pub fn try_collect(&mut self) -> Vec<CaptionDelivery> {
        let mut ready = Vec::new();
        while let Ok(delivery) = self.rx.try_recv() {
            ready.push(delivery);
        }
        self.in_flight = self.in_flight.saturating_sub(ready.len());
        ready
    }

    /// Waits for the next result. Returns `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<CaptionDelivery> {
        if self.in_flight == 0 {
            return None;
        }
        let delivery = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(delivery)
    }
}
