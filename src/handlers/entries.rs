use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::dto::{CreateEntryRequest, ListQuery, MarkDoneQuery, UpdateEntryRequest};
use crate::error::{AppError, AppResult};
use crate::models::entry::DiaryEntry;
use crate::store::EntryStore;
use crate::AppState;

type EntryId = WithRejection<Path<i64>, AppError>;

pub async fn create_entry(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateEntryRequest>, AppError>,
) -> AppResult<(StatusCode, Json<DiaryEntry>)> {
    body.validate()?;

    let mut store = EntryStore::acquire(&state.db).await?;
    let entry = store.create(&body.into()).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let mut store = EntryStore::acquire(&state.db).await?;
    let entries = store.list(query.skip, query.limit).await?;

    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): EntryId,
) -> AppResult<Json<DiaryEntry>> {
    let mut store = EntryStore::acquire(&state.db).await?;
    let entry = store
        .get(entry_id)
        .await?
        .ok_or_else(AppError::entry_not_found)?;

    Ok(Json(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): EntryId,
    WithRejection(Json(body), _): WithRejection<Json<UpdateEntryRequest>, AppError>,
) -> AppResult<Json<DiaryEntry>> {
    // Reject bad input before touching the store
    let changes = body.into_changes()?;

    let mut store = EntryStore::acquire(&state.db).await?;
    let entry = store
        .update(entry_id, &changes)
        .await?
        .ok_or_else(AppError::entry_not_found)?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): EntryId,
) -> AppResult<StatusCode> {
    let mut store = EntryStore::acquire(&state.db).await?;
    if !store.delete(entry_id).await? {
        return Err(AppError::entry_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_entry_done(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): EntryId,
    WithRejection(Query(query), _): WithRejection<Query<MarkDoneQuery>, AppError>,
) -> AppResult<Json<DiaryEntry>> {
    let mut store = EntryStore::acquire(&state.db).await?;
    let entry = store
        .mark_done(entry_id, query.is_done)
        .await?
        .ok_or_else(AppError::entry_not_found)?;

    Ok(Json(entry))
}
