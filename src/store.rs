//! Observable item store.
//!
//! The store owns the single [`AppState`] snapshot and replaces it wholesale
//! in response to a closed set of actions, notifying subscribers after every
//! replacement. It is constructed explicitly and shared by handle; nothing
//! in this crate reaches it through a global.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::Item;

/// Snapshot of everything a front-end reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Items in insertion order from the last successful fetch or mutation.
    pub items: Vec<Item>,
    /// True strictly while a sync operation's network call is outstanding.
    pub loading: bool,
    /// Message from the most recent failed operation. A later success does
    /// not clear it; only `Reset` does.
    pub error: Option<String>,
}

/// Closed set of state transitions consumed by [`reduce`].
#[derive(Debug, Clone)]
pub enum Action {
    ItemsReplaced(Vec<Item>),
    LoadingChanged(bool),
    ErrorSet(Option<String>),
    Reset,
}

/// Pure transition function. Each action replaces exactly one slot of the
/// prior state; `Reset` restores the initial state.
pub fn reduce(prior: &AppState, action: Action) -> AppState {
    match action {
        Action::ItemsReplaced(items) => AppState {
            items,
            ..prior.clone()
        },
        Action::LoadingChanged(loading) => AppState {
            loading,
            ..prior.clone()
        },
        Action::ErrorSet(error) => AppState {
            error,
            ..prior.clone()
        },
        Action::Reset => AppState::default(),
    }
}

/// Handle returned by [`Store::subscribe`]. Pass it back to
/// [`Store::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Container for the single [`AppState`] instance.
///
/// All operations are synchronous and never fail. Subscribers are invoked
/// synchronously with the new snapshot after each replacement, outside the
/// state lock, so a callback may read the store or manage subscriptions.
pub struct Store {
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AppState::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Cloned snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.lock().unwrap().clone()
    }

    /// Registers a callback invoked with the new state after every
    /// replacement.
    pub fn subscribe(&self, callback: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap()
            .push((id, Arc::new(callback)));
        id
    }

    /// Removes a previously registered callback. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|(sub_id, _)| *sub_id != id);
    }

    /// Replaces `items`, leaving `loading` and `error` untouched.
    pub fn apply_items(&self, items: Vec<Item>) -> AppState {
        self.dispatch(Action::ItemsReplaced(items))
    }

    /// Replaces `loading` only.
    pub fn set_loading(&self, loading: bool) -> AppState {
        self.dispatch(Action::LoadingChanged(loading))
    }

    /// Replaces `error` only.
    pub fn set_error(&self, error: Option<String>) -> AppState {
        self.dispatch(Action::ErrorSet(error))
    }

    /// Restores the initial state exactly.
    pub fn reset(&self) -> AppState {
        self.dispatch(Action::Reset)
    }

    /// Runs the action through [`reduce`], swaps the held state, then
    /// notifies every subscriber with the new snapshot.
    pub fn dispatch(&self, action: Action) -> AppState {
        let next = {
            let mut state = self.state.lock().unwrap();
            let next = reduce(&state, action);
            *state = next.clone();
            next
        };

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(&next);
        }

        next
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, completed: bool) -> Item {
        Item {
            id,
            title: title.to_string(),
            completed,
            position: None,
        }
    }

    #[test]
    fn test_reduce_replaces_items_only() {
        let prior = AppState {
            items: vec![item(1, "A", false)],
            loading: true,
            error: Some("boom".to_string()),
        };

        let next = reduce(&prior, Action::ItemsReplaced(vec![item(2, "B", true)]));
        assert_eq!(next.items, vec![item(2, "B", true)]);
        assert!(next.loading);
        assert_eq!(next.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_reduce_replaces_loading_only() {
        let prior = AppState {
            items: vec![item(1, "A", false)],
            loading: false,
            error: None,
        };

        let next = reduce(&prior, Action::LoadingChanged(true));
        assert!(next.loading);
        assert_eq!(next.items, prior.items);
        assert_eq!(next.error, None);
    }

    #[test]
    fn test_reduce_replaces_error_only() {
        let prior = AppState {
            items: vec![item(1, "A", false)],
            loading: true,
            error: None,
        };

        let next = reduce(&prior, Action::ErrorSet(Some("error: 500".to_string())));
        assert_eq!(next.error.as_deref(), Some("error: 500"));
        assert_eq!(next.items, prior.items);
        assert!(next.loading);

        let cleared = reduce(&next, Action::ErrorSet(None));
        assert_eq!(cleared.error, None);
    }

    #[test]
    fn test_reduce_reset_restores_initial_state() {
        let prior = AppState {
            items: vec![item(1, "A", true)],
            loading: true,
            error: Some("boom".to_string()),
        };

        assert_eq!(reduce(&prior, Action::Reset), AppState::default());
    }

    #[test]
    fn test_store_state_is_a_snapshot() {
        let store = Store::new();
        let before = store.state();
        store.apply_items(vec![item(1, "A", false)]);

        assert!(before.items.is_empty());
        assert_eq!(store.state().items.len(), 1);
    }

    #[test]
    fn test_apply_items_leaves_error_in_place() {
        let store = Store::new();
        store.set_error(Some("error: 500 Internal Server Error".to_string()));
        store.apply_items(vec![item(1, "A", false)]);

        let state = store.state();
        assert_eq!(state.items.len(), 1);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_subscribers_see_every_replacement() {
        let store = Store::new();
        let seen: Arc<Mutex<Vec<AppState>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        store.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

        store.set_loading(true);
        store.apply_items(vec![item(1, "A", false)]);
        store.set_loading(false);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].loading);
        assert!(seen[1].loading);
        assert_eq!(seen[1].items.len(), 1);
        assert!(!seen[2].loading);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new();
        let count = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&count);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        store.set_loading(true);
        store.unsubscribe(id);
        store.set_loading(false);

        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_subscriber_may_read_the_store() {
        let store = Arc::new(Store::new());
        let observed = Arc::new(Mutex::new(Vec::new()));

        let handle = Arc::clone(&store);
        let sink = Arc::clone(&observed);
        store.subscribe(move |_| sink.lock().unwrap().push(handle.state().loading));

        store.set_loading(true);
        assert_eq!(*observed.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_dispatch_returns_the_new_state() {
        let store = Store::new();
        let state = store.apply_items(vec![item(4, "D", false)]);
        assert_eq!(state, store.state());
    }

    #[test]
    fn test_reset_clears_everything() {
        let store = Store::new();
        store.apply_items(vec![item(1, "A", false)]);
        store.set_error(Some("boom".to_string()));
        store.set_loading(true);

        assert_eq!(store.reset(), AppState::default());
    }
}
