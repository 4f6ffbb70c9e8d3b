//! In-process stand-in for the remote collection endpoint, used by the
//! service tests. Serves the same routes and status codes as the public
//! demo API, plus a switch to script failure responses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use crate::models::{Item, NewItem};

#[derive(Clone, Default)]
struct CollectionState {
    items: Arc<RwLock<Vec<Item>>>,
    next_id: Arc<AtomicU64>,
    /// When set, every route answers with this status and no body.
    fail_with: Arc<RwLock<Option<u16>>>,
}

/// Handle to a collection server bound on an ephemeral port.
pub struct Collection {
    base_url: String,
    state: CollectionState,
}

impl Collection {
    /// Starts a server seeded with `items`, serving on a background task.
    pub async fn seeded(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        let state = CollectionState {
            items: Arc::new(RwLock::new(items)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            fail_with: Arc::new(RwLock::new(None)),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes every route answer with `status` until [`recover`] is called.
    ///
    /// [`recover`]: Collection::recover
    pub async fn fail_with(&self, status: u16) {
        *self.state.fail_with.write().await = Some(status);
    }

    pub async fn recover(&self) {
        *self.state.fail_with.write().await = None;
    }
}

fn router(state: CollectionState) -> Router {
    Router::new()
        .route("/todos", get(list_items).post(create_item))
        .route("/todos/{id}", put(update_item).delete(delete_item))
        .with_state(state)
}

async fn scripted_failure(state: &CollectionState) -> Result<(), StatusCode> {
    match *state.fail_with.read().await {
        Some(status) => Err(StatusCode::from_u16(status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)),
        None => Ok(()),
    }
}

async fn list_items(
    State(state): State<CollectionState>,
) -> Result<Json<Vec<Item>>, StatusCode> {
    scripted_failure(&state).await?;
    Ok(Json(state.items.read().await.clone()))
}

async fn create_item(
    State(state): State<CollectionState>,
    Json(fields): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    scripted_failure(&state).await?;
    let item = Item {
        id: state.next_id.fetch_add(1, Ordering::Relaxed),
        title: fields.title,
        completed: fields.completed,
        position: fields.position,
    };
    state.items.write().await.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Deserialize)]
struct StatusFields {
    completed: bool,
}

async fn update_item(
    State(state): State<CollectionState>,
    Path(id): Path<u64>,
    Json(fields): Json<StatusFields>,
) -> Result<Json<Item>, StatusCode> {
    scripted_failure(&state).await?;
    let mut items = state.items.write().await;
    let item = items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    item.completed = fields.completed;
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(state): State<CollectionState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    scripted_failure(&state).await?;
    // The demo endpoint answers 200 whether or not the id exists.
    state.items.write().await.retain(|item| item.id != id);
    Ok(StatusCode::OK)
}
