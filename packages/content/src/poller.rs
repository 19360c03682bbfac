//! # Remote Change Poller
//!
//! Detects out-of-band edits to the content store (another editor, a git
//! pull) by periodically comparing content revisions.
//!
//! The first poll only records a baseline. Each later poll reports one
//! [`ChangeEvent`] per path that appeared, changed, or disappeared since the
//! previous poll.
//!
//! ```rust,ignore
//! let handle = RemotePoller::new(store, Duration::from_secs(30)).spawn();
//! while let Some(event) = handle.events.recv().await {
//!     println!("{} {}", event.kind, event.path);
//! }
//! handle.shutdown().await;
//! ```

use crate::error::StoreResult;
use crate::store::{ContentStore, Revision};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default gap between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Content-root-relative path
    pub path: String,
    pub kind: ChangeKind,
}

pub struct RemotePoller {
    store: Arc<dyn ContentStore>,
    period: Duration,
    known: HashMap<String, Revision>,
    primed: bool,
}

impl RemotePoller {
    pub fn new(store: Arc<dyn ContentStore>, period: Duration) -> Self {
        Self {
            store,
            period,
            known: HashMap::new(),
            primed: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Compare current revisions against the last poll.
    ///
    /// Returns no events on the first call, which only records the baseline.
    pub async fn poll_once(&mut self) -> StoreResult<Vec<ChangeEvent>> {
        let mut current = HashMap::new();
        for path in self.store.list_paths().await? {
            // A file can vanish between listing and reading
            if let Some(revision) = self.store.revision(&path).await? {
                current.insert(path, revision);
            }
        }

        let mut events = Vec::new();
        if self.primed {
            for (path, revision) in &current {
                match self.known.get(path) {
                    None => events.push(ChangeEvent {
                        path: path.clone(),
                        kind: ChangeKind::Created,
                    }),
                    Some(previous) if previous != revision => events.push(ChangeEvent {
                        path: path.clone(),
                        kind: ChangeKind::Modified,
                    }),
                    Some(_) => {}
                }
            }
            for path in self.known.keys() {
                if !current.contains_key(path) {
                    events.push(ChangeEvent {
                        path: path.clone(),
                        kind: ChangeKind::Removed,
                    });
                }
            }
            events.sort_by(|a, b| a.path.cmp(&b.path));
        }

        debug!(tracked = current.len(), changed = events.len(), "Polled content store");
        self.known = current;
        self.primed = true;
        Ok(events)
    }

    /// Poll until `shutdown` flips to `true` or the receiver goes away
    pub async fn run(mut self, events: mpsc::Sender<ChangeEvent>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = self.period.as_secs_f64(), "Remote poller started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let changes = match self.poll_once().await {
                        Ok(changes) => changes,
                        Err(err) => {
                            warn!(error = %err, "Poll failed, retrying next tick");
                            continue;
                        }
                    };
                    for change in changes {
                        if events.send(change).await.is_err() {
                            debug!("Change receiver dropped");
                            return;
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Remote poller stopped");
    }

    /// Run on the tokio runtime
    pub fn spawn(self) -> PollerHandle {
        let (event_tx, event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(event_tx, shutdown_rx));

        PollerHandle {
            events: event_rx,
            shutdown: shutdown_tx,
            task,
        }
    }
}

pub struct PollerHandle {
    pub events: mpsc::Receiver<ChangeEvent>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop polling and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            warn!(error = %err, "Remote poller task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryContentStore;

    #[tokio::test]
    async fn test_first_poll_is_baseline() {
        let store = MemoryContentStore::new();
        store.write_raw("pages/home.json", "{}").unwrap();

        let mut poller = RemotePoller::new(Arc::new(store), DEFAULT_POLL_INTERVAL);
        assert!(poller.poll_once().await.unwrap().is_empty());
        assert!(poller.poll_once().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reports_each_kind() {
        let store = MemoryContentStore::new();
        store.write_raw("pages/home.json", "{}").unwrap();
        store.write_raw("pages/old.json", "{}").unwrap();

        let mut poller = RemotePoller::new(Arc::new(store.clone()), DEFAULT_POLL_INTERVAL);
        poller.poll_once().await.unwrap();

        store.write_raw("pages/home.json", r#"{"title":"x"}"#).unwrap();
        store.remove_raw("pages/old.json").unwrap();
        store.write_raw("components/Hero.json", "{}").unwrap();

        let events = poller.poll_once().await.unwrap();
        assert_eq!(
            events,
            vec![
                ChangeEvent {
                    path: "components/Hero.json".to_string(),
                    kind: ChangeKind::Created,
                },
                ChangeEvent {
                    path: "pages/home.json".to_string(),
                    kind: ChangeKind::Modified,
                },
                ChangeEvent {
                    path: "pages/old.json".to_string(),
                    kind: ChangeKind::Removed,
                },
            ]
        );
    }
}
