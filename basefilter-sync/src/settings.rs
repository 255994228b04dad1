// basefilter-sync/src/settings.rs

use basefilter_core::Settings;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Holds the current settings and pushes every new snapshot to subscribers
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: Arc<Settings>,
    subscribers: Vec<Sender<Arc<Settings>>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Arc::new(settings),
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Arc<Settings> {
        Arc::clone(&self.current)
    }

    /// Returns a receiver that already holds the current snapshot.
    pub fn subscribe(&mut self) -> Receiver<Arc<Settings>> {
        let (tx, rx) = channel();
        // Cannot fail: the receiver is still alive
        let _ = tx.send(self.current());
        self.subscribers.push(tx);
        rx
    }

    /// Derives a new snapshot from the current one and publishes it.
    ///
    /// Subscribers whose receiver was dropped are forgotten.
    pub fn update(&mut self, f: impl FnOnce(&mut Settings)) -> Arc<Settings> {
        let mut next = (*self.current).clone();
        f(&mut next);
        self.current = Arc::new(next);

        let snapshot = self.current();
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        snapshot
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_is_primed_with_current() {
        let mut store = SettingsStore::new(Settings::default());
        let rx = store.subscribe();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.code_fence_language, "base");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_update_publishes_to_every_subscriber() {
        let mut store = SettingsStore::new(Settings::default());
        let a = store.subscribe();
        let b = store.subscribe();

        store.update(|s| s.code_fence_language = "dataview".to_string());

        for rx in [a, b] {
            let seen: Vec<String> = rx
                .try_iter()
                .map(|s| s.code_fence_language.clone())
                .collect();
            assert_eq!(seen, vec!["base", "dataview"]);
        }
        assert_eq!(store.current().code_fence_language, "dataview");
    }

    #[test]
    fn test_update_keeps_old_snapshot_intact() {
        let mut store = SettingsStore::new(Settings::default());
        let before = store.current();

        store.update(|s| s.target_embeds = false);

        assert!(before.target_embeds);
        assert!(!store.current().target_embeds);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut store = SettingsStore::new(Settings::default());
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);

        store.update(|s| s.update_debounce_ms = 0);

        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(kept.try_iter().last().unwrap().update_debounce_ms, 0);
    }
}
