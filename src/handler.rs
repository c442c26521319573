use std::sync::Arc;

use axum::{Json, response::IntoResponse};

use tracing::info;

use crate::api::HealthResponse;
use crate::config::RuntimeMode;
use crate::db::Database;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub mode: RuntimeMode,
    /// Prefix the routes are mounted under, used to build `Location` headers.
    pub base_path: String,
}

impl AppState {
    pub fn new(db: Arc<Database>, mode: RuntimeMode, base_path: impl Into<String>) -> Self {
        AppState {
            db,
            mode,
            base_path: base_path.into(),
        }
    }

    /// Logs a persistence failure and turns it into a 500, with the error chain
    /// in the body unless running in production.
    pub fn store_failure(&self, context: &str, err: anyhow::Error) -> ApiError {
        let detail = crate::unpack_error(&*err);
        tracing::error!(error = %detail, "failed to {}", context);

        ApiError::StoreFailure {
            detail: self.mode.exposes_errors().then_some(detail),
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(HealthResponse { status: "ok" })
}
