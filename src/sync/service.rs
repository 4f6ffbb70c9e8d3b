//! Async CRUD operations against the remote collection.

use std::sync::Arc;

use reqwest::StatusCode;

use super::error::SyncError;
use crate::models::{Item, NewItem};
use crate::store::Store;

/// Bridge between the remote collection endpoint and the store.
///
/// Every operation follows the same protocol: mark the store loading, issue
/// one HTTP request, apply the new collection on success or record an error
/// on failure, then clear the loading flag as the final step.
///
/// The mutating operations read the *currently held* collection at the
/// moment the response arrives, not a snapshot taken at call start. Two
/// in-flight operations can therefore overwrite each other's result; the
/// later resume wins. That window matches the front-ends this crate serves
/// and is left uncoordinated.
pub struct SyncService {
    client: reqwest::Client,
    base_url: String,
    store: Arc<Store>,
}

impl SyncService {
    pub fn new(base_url: impl Into<String>, store: Arc<Store>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
        }
    }

    /// The store this service writes into.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Fetches the full collection. On success the response body replaces
    /// the held items wholesale, in response order.
    pub async fn list(&self) {
        self.store.set_loading(true);
        match self.fetch_collection().await {
            Ok(items) => {
                self.store.apply_items(items);
            }
            Err(e) => {
                tracing::warn!("list failed: {}", e);
                self.store.set_error(Some(e.to_string()));
            }
        }
        self.store.set_loading(false);
    }

    /// Creates an item. On success the server-assigned record is prepended
    /// to the currently held collection.
    pub async fn create(&self, fields: NewItem) {
        self.store.set_loading(true);
        match self.post_item(&fields).await {
            Ok(created) => {
                let mut items = vec![created];
                items.extend(self.store.state().items);
                self.store.apply_items(items);
            }
            Err(e) => {
                tracing::warn!("create failed: {}", e);
                self.store.set_error(Some(e.to_string()));
            }
        }
        self.store.set_loading(false);
    }

    /// Flips the completion flag of one item. On success the matching id in
    /// the currently held collection gets its `completed` field replaced;
    /// every other item passes through unchanged.
    pub async fn update_status(&self, id: u64, completed: bool) {
        self.store.set_loading(true);
        match self.put_status(id, completed).await {
            Ok(()) => {
                let items = self
                    .store
                    .state()
                    .items
                    .into_iter()
                    .map(|item| {
                        if item.id == id {
                            item.with_completed(completed)
                        } else {
                            item
                        }
                    })
                    .collect();
                self.store.apply_items(items);
            }
            Err(e) => {
                tracing::warn!("update failed: {}", e);
                self.store.set_error(Some(e.to_string()));
            }
        }
        self.store.set_loading(false);
    }

    /// Deletes an item. On success the matching id is filtered out of the
    /// currently held collection, preserving the order of the rest.
    pub async fn delete(&self, id: u64) {
        self.store.set_loading(true);
        match self.delete_item(id).await {
            Ok(()) => {
                let items = self
                    .store
                    .state()
                    .items
                    .into_iter()
                    .filter(|item| item.id != id)
                    .collect();
                self.store.apply_items(items);
            }
            Err(e) => {
                tracing::warn!("delete failed: {}", e);
                self.store.set_error(Some(e.to_string()));
            }
        }
        self.store.set_loading(false);
    }

    async fn fetch_collection(&self) -> Result<Vec<Item>, SyncError> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(SyncError::from_status(response.status()));
        }

        response
            .json::<Vec<Item>>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn post_item(&self, fields: &NewItem) -> Result<Item, SyncError> {
        let url = self.collection_url();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(fields)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            return Err(SyncError::from_status(response.status()));
        }

        response
            .json::<Item>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn put_status(&self, id: u64, completed: bool) -> Result<(), SyncError> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);

        let body = serde_json::json!({ "completed": completed });
        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        // The completed value is already known locally; the response body
        // is not consulted.
        if response.status() != StatusCode::OK {
            return Err(SyncError::from_status(response.status()));
        }
        Ok(())
    }

    async fn delete_item(&self, id: u64) -> Result<(), SyncError> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(SyncError::from_status(response.status()));
        }
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url.trim_end_matches('/'))
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}
