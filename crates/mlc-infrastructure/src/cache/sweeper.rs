//! L1 expiry sweeper
//!
//! Reads already skip expired entries; the sweeper reclaims the memory of
//! entries nobody reads again.

use crate::cache::manager::CacheManager;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

impl CacheManager {
    /// Spawn a task purging expired L1 entries every `interval`
    pub fn spawn_expiry_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let l1 = self.l1().clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = l1.purge_expired().await;
                if purged > 0 {
                    debug!(purged, provider = l1.provider_name(), "Purged expired L1 entries");
                }
            }
        })
    }
}
