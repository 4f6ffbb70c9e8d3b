//! Squadlist Core Library
//!
//! An observable item store plus the async sync operations that keep it
//! aligned with a remote collection endpoint.

pub mod config;
pub mod models;
pub mod store;
pub mod sync;

pub use config::Config;
pub use models::{Item, NewItem, Position};
pub use store::{reduce, Action, AppState, Store, SubscriptionId};
pub use sync::{SyncError, SyncService};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
