use axum::{extract::State, http::StatusCode};
use tracing::error;

use alcove_store::ThreadStore;

use crate::AppState;

/// Liveness: answers only when the store does.
pub async fn healthz(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    state.store.ping().await.map_err(|err| {
        error!("health check failed: {}", err);
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}
