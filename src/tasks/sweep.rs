//! TTL Sweep Task
//!
//! Background task that periodically removes expired LFU entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LfuStore;

/// Spawns the background task that periodically sweeps expired entries
/// out of an LFU store.
///
/// The task runs in an infinite loop, sleeping for the configured interval
/// between sweeps, then taking the store's write lock to remove every
/// entry whose TTL has elapsed. Entries are only ever expired here, never
/// on lookup, so an entry can outlive its TTL by at most one interval.
///
/// # Arguments
/// * `store` - Shared reference to the LFU store
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task. `LfuCache` aborts it on drop so the
/// sweeper never outlives its cache.
pub fn spawn_sweep_task<K, V>(
    store: Arc<RwLock<LfuStore<K, V>>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and remove expired entries
            let removed = {
                let mut store_guard = store.write().await;
                store_guard.sweep_expired()
            };

            // Log sweep statistics
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let store = Arc::new(RwLock::new(LfuStore::new(100)));

        // Add an entry that expires after one second
        {
            let mut store_guard = store.write().await;
            store_guard.put("expire_soon".to_string(), "value".to_string(), 0);
        }

        // Spawn sweep task with 1 second interval
        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Verify the entry was removed
        {
            let mut store_guard = store.write().await;
            let result = store_guard.get(&"expire_soon".to_string());
            assert!(result.is_none(), "Expired entry should have been swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let store = Arc::new(RwLock::new(LfuStore::new(100)));

        // Add an entry with a long TTL
        {
            let mut store_guard = store.write().await;
            store_guard.put("long_lived".to_string(), "value".to_string(), 3600);
        }

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        // Wait for a sweep to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Verify the entry still exists
        {
            let mut store_guard = store.write().await;
            let result = store_guard.get(&"long_lived".to_string());
            assert_eq!(result, Some("value".to_string()));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let store: Arc<RwLock<LfuStore<String, String>>> = Arc::new(RwLock::new(LfuStore::new(100)));

        let handle = spawn_sweep_task(store, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify the task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
