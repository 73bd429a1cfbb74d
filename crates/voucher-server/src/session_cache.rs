//! Active-Session Cache
//!
//! Process-wide read cache of the device's active hotspot sessions.
//! Single writer (the refresh task), many readers (HTTP handlers). The
//! whole snapshot is replaced in one `watch::Sender::send_replace`, so a
//! reader can never observe `count` and `sessions` from different refresh
//! cycles. A failed refresh keeps the previous snapshot: stale but valid.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use voucher_device::{ActiveSession, DeviceClient};

/// How often the cache is refreshed from the device
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// One refresh cycle's worth of sessions
///
/// Invariant: `count == sessions.len()` for every snapshot a refresh
/// publishes (including the initial empty one).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub count: usize,
    pub sessions: Vec<ActiveSession>,
}

/// Read handle to the cache
///
/// `snapshot()` is a non-blocking borrow of the latest published value; it
/// never queries the device and never waits on a refresh in flight.
#[derive(Clone)]
pub struct SessionCache {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionCache {
    /// Wrap an externally driven receiver (tests, custom schedules)
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self { rx }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }
}

/// Run one refresh cycle against the device
///
/// On success the snapshot is swapped wholesale; on failure it is left
/// untouched and the error goes to the log. Refresh failures are never
/// fatal and never reach a reader.
pub async fn refresh(device: &dyn DeviceClient, tx: &watch::Sender<SessionSnapshot>) {
    tracing::debug!(device = device.name(), "Refreshing active sessions");

    match device.active_sessions().await {
        Ok(sessions) => {
            let snapshot = SessionSnapshot {
                count: sessions.len(),
                sessions,
            };
            tracing::info!(count = snapshot.count, "Active session cache updated");
            tx.send_replace(snapshot);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Active session refresh failed, keeping previous snapshot");
        }
    }
}

/// Spawn the periodic refresher and return the read handle
///
/// The first tick of `tokio::time::interval` completes immediately, which
/// gives the cache its startup refresh; after that it runs every `period`
/// for the life of the process.
pub fn spawn_refresher(device: Arc<dyn DeviceClient>, period: Duration) -> SessionCache {
    let (tx, rx) = watch::channel(SessionSnapshot::default());

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            refresh(device.as_ref(), &tx).await;
        }
    });

    SessionCache::new(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voucher_device::MockDeviceClient;

    fn session(user: &str) -> ActiveSession {
        ActiveSession {
            user: Some(user.into()),
            address: Some("10.5.50.17".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let (_tx, rx) = watch::channel(SessionSnapshot::default());
        let cache = SessionCache::new(rx);

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.count, 0);
        assert!(snapshot.sessions.is_empty());
    }

    #[tokio::test]
    async fn refresh_publishes_count_matching_sessions() {
        let device = MockDeviceClient::with_sessions(vec![session("a"), session("b")]);
        let (tx, rx) = watch::channel(SessionSnapshot::default());

        refresh(&device, &tx).await;

        let snapshot = SessionCache::new(rx).snapshot();
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.count, snapshot.sessions.len());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_snapshot() {
        let device = MockDeviceClient::with_sessions(vec![session("a")]);
        let (tx, rx) = watch::channel(SessionSnapshot::default());
        let cache = SessionCache::new(rx);

        refresh(&device, &tx).await;
        let before = cache.snapshot();
        assert_eq!(before.count, 1);

        device.set_fail_sessions(true);
        refresh(&device, &tx).await;
        assert_eq!(cache.snapshot(), before);

        device.set_fail_auth(true);
        refresh(&device, &tx).await;
        assert_eq!(cache.snapshot(), before);
    }

    #[tokio::test]
    async fn empty_device_reply_clears_the_cache() {
        let device = MockDeviceClient::with_sessions(vec![session("a")]);
        let (tx, rx) = watch::channel(SessionSnapshot::default());
        let cache = SessionCache::new(rx);

        refresh(&device, &tx).await;
        assert_eq!(cache.snapshot().count, 1);

        device.set_sessions(vec![]);
        refresh(&device, &tx).await;
        assert_eq!(cache.snapshot(), SessionSnapshot::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresher_runs_once_at_startup() {
        let device = Arc::new(MockDeviceClient::with_sessions(vec![session("a")]));
        // Long period so only the immediate startup tick fires.
        let cache = spawn_refresher(device.clone(), Duration::from_secs(3600));

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.snapshot().count, 1);
        assert_eq!(device.session_query_count(), 1);
    }

    #[tokio::test]
    async fn snapshot_reads_never_query_the_device() {
        let device = Arc::new(MockDeviceClient::with_sessions(vec![session("a")]));
        let (tx, rx) = watch::channel(SessionSnapshot::default());
        let cache = SessionCache::new(rx);

        refresh(device.as_ref(), &tx).await;
        let queries = device.session_query_count();

        for _ in 0..10 {
            let _ = cache.snapshot();
        }
        assert_eq!(device.session_query_count(), queries);
    }
}
