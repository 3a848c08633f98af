use crate::notify::Notifier;
use crate::poll::PollCycle;
use database::Database;
use photowatch_core::{CoreError, ErrorExt, PhotoFetcher};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Thin owner of the poll cycle's side effects: loads persisted state,
/// runs a cycle, persists the new id at most once, notifies at most
/// once, and drives the periodic loop.
pub struct PollService<F, N> {
    cycle: PollCycle<F>,
    notifier: N,
    database: Database,
    polling_interval: Duration,
    notifications_enabled: bool,
}

impl<F: PhotoFetcher, N: Notifier> PollService<F, N> {
    pub fn new(
        fetcher: F,
        notifier: N,
        database: Database,
        polling_interval_minutes: u64,
    ) -> Self {
        Self {
            cycle: PollCycle::new(fetcher),
            notifier,
            database,
            polling_interval: Duration::from_secs(polling_interval_minutes * 60),
            notifications_enabled: true,
        }
    }

    pub fn with_notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// One scheduled tick. Fetch-side problems are absorbed inside the
    /// cycle and still count as success; persistence problems propagate
    /// so the caller can log and try again next tick.
    pub async fn run_once(&self) -> Result<(), CoreError> {
        let query = self.database.stored_query().await?;
        let last_seen_id = self.database.last_result_id().await?;

        let outcome = self.cycle.run(&query, last_seen_id.as_deref()).await;

        let Some(newest) = outcome.newest else {
            debug!("No new photos this cycle");
            return Ok(());
        };

        // Persist before notifying: a crash between the two drops one
        // notification instead of repeating it every cycle.
        self.database.set_last_result_id(&newest.id).await?;

        if !self.notifications_enabled {
            debug!("Notifications disabled, skipping alert for {}", newest.id);
            return Ok(());
        }

        if let Err(e) = self.notifier.notify_user(&newest).await {
            CoreError::from(e).log_warn();
        }

        Ok(())
    }

    /// Periodic loop. Each cycle is awaited to completion before the
    /// next tick fires, so at most one invocation reads and writes the
    /// persisted slot at a time.
    pub async fn start(&self) -> Result<(), CoreError> {
        info!("Starting poll loop (interval: {:?})", self.polling_interval);

        let mut ticker = interval(self.polling_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                e.log_error();
            }
        }
    }
}
