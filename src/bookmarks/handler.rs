//! HTTP handlers for `/bookmarks`

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{BookmarkStore, validate_create, validate_update};
use crate::api::{CreateBookmarkRequest, UpdateBookmarkRequest};
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::Bookmark;

/// A path segment that is not an integer cannot name a bookmark.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

async fn find(store: &BookmarkStore<'_>, state: &AppState, id: i64) -> Result<Bookmark, ApiError> {
    match store.get_by_id(id).await {
        Ok(Some(bookmark)) => Ok(bookmark),
        Ok(None) => {
            tracing::info!(id, "bookmark not found");
            Err(ApiError::NotFound)
        }
        Err(e) => Err(state.store_failure("get bookmark", e)),
    }
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = BookmarkStore::new(state.db.connection());

    let bookmarks = store
        .list_all()
        .await
        .map_err(|e| state.store_failure("list bookmarks", e))?;

    let bookmarks: Vec<Bookmark> = bookmarks.into_iter().map(Bookmark::sanitized).collect();
    tracing::info!(count = bookmarks.len(), "listed bookmarks");

    Ok((StatusCode::OK, Json(bookmarks)).into_response())
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let store = BookmarkStore::new(state.db.connection());

    let bookmark = find(&store, &state, id).await?;

    Ok((StatusCode::OK, Json(bookmark.sanitized())).into_response())
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = body(payload)?;
    let bookmark = validate_create(&payload).inspect_err(|e| tracing::info!(error = %e, "rejected bookmark"))?;

    let store = BookmarkStore::new(state.db.connection());
    let created = store
        .insert(&bookmark)
        .await
        .map_err(|e| state.store_failure("create bookmark", e))?
        .sanitized();

    tracing::info!(id = created.id, "created bookmark");
    let location = format!("{}/bookmarks/{}", state.base_path, created.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookmarkRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let store = BookmarkStore::new(state.db.connection());

    find(&store, &state, id).await?;

    let payload = body(payload)?;
    let patch = validate_update(&payload).inspect_err(|e| tracing::info!(id, error = %e, "rejected update"))?;

    let affected = store
        .update(id, &patch)
        .await
        .map_err(|e| state.store_failure("update bookmark", e))?;

    tracing::info!(id, affected, "updated bookmark");
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let store = BookmarkStore::new(state.db.connection());

    find(&store, &state, id).await?;

    store
        .delete(id)
        .await
        .map_err(|e| state.store_failure("delete bookmark", e))?;

    tracing::info!(id, "deleted bookmark");
    Ok(StatusCode::NO_CONTENT.into_response())
}
