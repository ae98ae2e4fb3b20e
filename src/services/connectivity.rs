use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Checks whether the network path to the upstream is usable.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn reachable(&self) -> bool;
}

/// HEAD probe against the upstream origin's favicon, then a cross-origin
/// fallback. Any HTTP response counts as reachable.
pub struct HttpProbe {
    client: reqwest::Client,
    primary: String,
    fallback: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client, api_base_url: &str, fallback: String, timeout: Duration) -> Self {
        Self {
            client,
            primary: favicon_url(api_base_url),
            fallback,
            timeout,
        }
    }

    async fn head(&self, url: &str) -> bool {
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("probe {url} failed: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn reachable(&self) -> bool {
        self.head(&self.primary).await || self.head(&self.fallback).await
    }
}

fn favicon_url(base: &str) -> String {
    match reqwest::Url::parse(base) {
        Ok(url) => format!("{}/favicon.ico", url.origin().ascii_serialization()),
        Err(_) => format!("{}/favicon.ico", base.trim_end_matches('/')),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectivityStatus {
    Online,
    Offline { since: DateTime<Utc> },
    /// Connectivity came back; shown briefly before returning to `Online`.
    Restored { at: DateTime<Utc> },
}

impl ConnectivityStatus {
    pub fn is_offline(&self) -> bool {
        matches!(self, ConnectivityStatus::Offline { .. })
    }
}

/// Probe scheduling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePolicy {
    pub online_interval: Duration,
    /// First delay after going offline.
    pub offline_interval: Duration,
    pub offline_max_interval: Duration,
    /// Multiplier applied per failed probe while offline; 1.0 keeps it fixed.
    pub backoff_factor: f64,
    pub timeout: Duration,
    /// How long `Restored` is reported before settling to `Online`.
    pub confirmation: Duration,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            online_interval: Duration::from_secs(30),
            offline_interval: Duration::from_secs(10),
            offline_max_interval: Duration::from_secs(30),
            backoff_factor: 1.5,
            timeout: Duration::from_secs(5),
            confirmation: Duration::from_secs(3),
        }
    }
}

impl ProbePolicy {
    /// Delay before the next probe after `failed` consecutive failures (`failed >= 1`).
    pub fn offline_delay(&self, failed: u32) -> Duration {
        let exp = failed.saturating_sub(1).min(32) as i32;
        let secs = self.offline_interval.as_secs_f64() * self.backoff_factor.max(1.0).powi(exp);
        let cap = self.offline_max_interval.max(self.offline_interval);
        Duration::try_from_secs_f64(secs)
            .map(|d| d.min(cap))
            .unwrap_or(cap)
    }
}

/// Pure status bookkeeping, driven by probe results.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    status: ConnectivityStatus,
    failed: u32,
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self {
            status: ConnectivityStatus::Online,
            failed: 0,
        }
    }
}

impl ConnectivityTracker {
    pub fn status(&self) -> &ConnectivityStatus {
        &self.status
    }

    /// Returns the new status when the probe result changes it.
    pub fn observe(&mut self, reachable: bool, now: DateTime<Utc>) -> Option<ConnectivityStatus> {
        let next = match (&self.status, reachable) {
            (ConnectivityStatus::Offline { .. }, true) => {
                self.failed = 0;
                Some(ConnectivityStatus::Restored { at: now })
            }
            (ConnectivityStatus::Offline { .. }, false) => {
                self.failed += 1;
                None
            }
            (_, false) => {
                self.failed = 1;
                Some(ConnectivityStatus::Offline { since: now })
            }
            (_, true) => {
                self.failed = 0;
                None
            }
        };

        if let Some(status) = &next {
            self.status = status.clone();
        }
        next
    }

    /// Ends the `Restored` confirmation window once it has elapsed.
    pub fn settle(&mut self, now: DateTime<Utc>, confirmation: Duration) -> Option<ConnectivityStatus> {
        if let ConnectivityStatus::Restored { at } = self.status {
            let elapsed = (now - at).to_std().unwrap_or(Duration::ZERO);
            if elapsed >= confirmation {
                self.status = ConnectivityStatus::Online;
                return Some(ConnectivityStatus::Online);
            }
        }
        None
    }

    pub fn next_delay(&self, policy: &ProbePolicy) -> Duration {
        match self.status {
            ConnectivityStatus::Online => policy.online_interval,
            ConnectivityStatus::Offline { .. } => policy.offline_delay(self.failed),
            ConnectivityStatus::Restored { .. } => policy.confirmation.min(policy.online_interval),
        }
    }
}

/// Read side of the watcher, shared through `AppState`.
#[derive(Clone)]
pub struct ConnectivityHandle {
    rx: watch::Receiver<ConnectivityStatus>,
}

impl ConnectivityHandle {
    pub fn channel(initial: ConnectivityStatus) -> (watch::Sender<ConnectivityStatus>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.rx.borrow().clone()
    }

    pub fn is_offline(&self) -> bool {
        self.rx.borrow().is_offline()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectivityStatus> {
        self.rx.clone()
    }
}

pub struct ConnectivityWatcher {
    probe: Arc<dyn Probe>,
    policy: ProbePolicy,
    tx: watch::Sender<ConnectivityStatus>,
}

impl ConnectivityWatcher {
    pub fn new(probe: Arc<dyn Probe>, policy: ProbePolicy) -> (Self, ConnectivityHandle) {
        let (tx, handle) = ConnectivityHandle::channel(ConnectivityStatus::Online);
        (Self { probe, policy, tx }, handle)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Probes until every handle has been dropped.
    pub async fn run(self) {
        let mut tracker = ConnectivityTracker::default();

        while !self.tx.is_closed() {
            let reachable = self.probe.reachable().await;
            if let Some(status) = tracker.observe(reachable, Utc::now()) {
                match &status {
                    ConnectivityStatus::Offline { .. } => tracing::warn!("upstream unreachable, console offline"),
                    ConnectivityStatus::Restored { .. } => tracing::info!("connectivity restored"),
                    ConnectivityStatus::Online => {}
                }
                self.tx.send_replace(status);
            }

            let delay = tracker.next_delay(&self.policy);
            tracing::debug!("next connectivity probe in {delay:?}");
            tokio::time::sleep(delay).await;

            if let Some(status) = tracker.settle(Utc::now(), self.policy.confirmation) {
                self.tx.send_replace(status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    struct ScriptedProbe {
        results: Mutex<VecDeque<bool>>,
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        async fn reachable(&self) -> bool {
            let mut results = self.results.lock().unwrap();
            if results.len() > 1 {
                results.pop_front().unwrap()
            } else {
                results.front().copied().unwrap_or(true)
            }
        }
    }

    fn fast_policy() -> ProbePolicy {
        ProbePolicy {
            online_interval: Duration::from_millis(10),
            offline_interval: Duration::from_millis(10),
            offline_max_interval: Duration::from_millis(20),
            backoff_factor: 1.5,
            timeout: Duration::from_millis(50),
            confirmation: Duration::from_millis(60),
        }
    }

    #[test]
    fn test_tracker_transitions() {
        let mut t = ConnectivityTracker::default();
        let t0 = Utc::now();

        assert_eq!(t.observe(true, t0), None);
        assert_eq!(t.observe(false, t0), Some(ConnectivityStatus::Offline { since: t0 }));
        assert_eq!(t.observe(false, t0), None);
        assert!(t.status().is_offline());

        let t1 = t0 + chrono::Duration::seconds(12);
        assert_eq!(t.observe(true, t1), Some(ConnectivityStatus::Restored { at: t1 }));
        assert_eq!(t.settle(t1 + chrono::Duration::seconds(1), Duration::from_secs(3)), None);
        assert_eq!(
            t.settle(t1 + chrono::Duration::seconds(3), Duration::from_secs(3)),
            Some(ConnectivityStatus::Online)
        );
        assert_eq!(t.status(), &ConnectivityStatus::Online);
    }

    #[test]
    fn test_restored_can_drop_offline_again() {
        let mut t = ConnectivityTracker::default();
        let now = Utc::now();
        t.observe(false, now);
        t.observe(true, now);
        assert!(matches!(t.observe(false, now), Some(ConnectivityStatus::Offline { .. })));
    }

    #[test]
    fn test_offline_backoff_is_capped() {
        let policy = ProbePolicy::default();
        assert_eq!(policy.offline_delay(1), Duration::from_secs(10));
        assert_eq!(policy.offline_delay(2), Duration::from_secs(15));
        assert_eq!(policy.offline_delay(3), Duration::from_secs_f64(22.5));
        assert_eq!(policy.offline_delay(4), Duration::from_secs(30));
        assert_eq!(policy.offline_delay(400), Duration::from_secs(30));

        let fixed = ProbePolicy {
            backoff_factor: 1.0,
            ..ProbePolicy::default()
        };
        assert_eq!(fixed.offline_delay(7), Duration::from_secs(10));

        let huge = ProbePolicy {
            offline_max_interval: Duration::MAX,
            backoff_factor: 1e300,
            ..ProbePolicy::default()
        };
        assert_eq!(huge.offline_delay(3), Duration::MAX);
    }

    #[test]
    fn test_next_delay_by_status() {
        let policy = ProbePolicy::default();
        let mut t = ConnectivityTracker::default();
        assert_eq!(t.next_delay(&policy), policy.online_interval);
        t.observe(false, Utc::now());
        t.observe(false, Utc::now());
        assert_eq!(t.next_delay(&policy), Duration::from_secs(15));
        t.observe(true, Utc::now());
        assert_eq!(t.next_delay(&policy), policy.confirmation);
    }

    #[test]
    fn test_favicon_url_uses_origin() {
        assert_eq!(
            favicon_url("https://api.example.com:8443/v1/api"),
            "https://api.example.com:8443/favicon.ico"
        );
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(ConnectivityStatus::Online).unwrap();
        assert_eq!(json, serde_json::json!({"state": "online"}));
    }

    #[tokio::test]
    async fn test_watcher_goes_offline_and_recovers() {
        let probe = Arc::new(ScriptedProbe {
            results: Mutex::new(VecDeque::from([false, false, true])),
        });
        let (watcher, handle) = ConnectivityWatcher::new(probe, fast_policy());
        let task = watcher.spawn();

        let mut rx = handle.subscribe();
        let mut seen = Vec::new();
        let collect = async {
            loop {
                if rx.changed().await.is_err() {
                    break;
                }
                let status = rx.borrow_and_update().clone();
                let done = status == ConnectivityStatus::Online;
                seen.push(status);
                if done {
                    break;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), collect)
            .await
            .expect("watcher never settled back online");
        task.abort();

        assert!(seen.first().is_some_and(|s| s.is_offline()));
        assert!(seen.iter().any(|s| matches!(s, ConnectivityStatus::Restored { .. })));
        assert_eq!(seen.last(), Some(&ConnectivityStatus::Online));
        assert!(!handle.is_offline());
    }
}
