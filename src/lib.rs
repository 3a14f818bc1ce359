use axum::{
    routing::{get, patch, MethodRouter},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

pub fn router(state: AppState) -> Router {
    let entry_collection: MethodRouter<AppState> =
        get(handlers::entries::list_entries).post(handlers::entries::create_entry);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Entries
        .route("/entries", entry_collection.clone())
        .route("/entries/", entry_collection)
        .route(
            "/entries/:id",
            get(handlers::entries::get_entry)
                .patch(handlers::entries::update_entry)
                .delete(handlers::entries::delete_entry),
        )
        .route("/entries/:id/done", patch(handlers::entries::mark_entry_done))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
