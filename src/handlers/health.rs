use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::dto::{MessageResponse, ReadinessResponse};
use crate::store::EntryStore;
use crate::AppState;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Diary API".into(),
    })
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once a pooled connection can be checked out and the entries table answers.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let check = async {
        let mut store = EntryStore::acquire(&state.db).await?;
        Ok::<_, sqlx::Error>(store.count().await?)
    };

    match check.await {
        Ok(entries) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                entries: Some(entries),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Entry store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "not_ready",
                    entries: None,
                }),
            )
        }
    }
}
