use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::services::price_feed::PriceFeed;

/// Owns the background polling task; the task stops when this is dropped
pub struct PollingHandle {
    task: Option<JoinHandle<()>>,
}

impl PollingHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the task and wait for it to wind down
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            tracing::info!("Price feed polling stopped");
        }
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Refresh the feed now, then every `every` until the handle is dropped
pub fn start_price_feed_job(feed: PriceFeed, every: Duration) -> PollingHandle {
    let task = tokio::spawn(async move {
        let mut interval = interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            "Starting price feed polling for {} assets (every {} seconds)",
            feed.assets().len(),
            every.as_secs()
        );

        loop {
            // First tick completes immediately
            interval.tick().await;

            let status = feed.refresh().await;
            tracing::debug!("Price feed refreshed: {:?}", status);
        }
    });

    PollingHandle { task: Some(task) }
}
