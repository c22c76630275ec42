//! CRUD handlers shared by both accepted-value collections.
//!
//! Each handler is generic over [`ResourceKind`] and mounted once per kind by
//! the router. The auth gate has already run by the time any of these
//! extract path, query or body.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::router::AppState;
use crate::types::{ResourceKind, TextField};

/// GET `{collection}`: every row, ordered by id.
pub async fn list_rows<K: ResourceKind>(
    State(state): State<AppState>,
) -> Result<Json<Vec<K::Output>>, AppError> {
    let rows = state.storage.list::<K>().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET `{values}`: just the text values.
pub async fn list_values<K: ResourceKind>(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.storage.list_values::<K>().await?))
}

/// GET `{lookup}?<param>=...`: ids of rows whose text matches exactly.
/// An empty or unmatched value yields `[]`.
pub async fn lookup_ids<K: ResourceKind>(
    State(state): State<AppState>,
    WithRejection(Query(param), _): WithRejection<Query<K::Param>, AppError>,
) -> Result<Json<Vec<i64>>, AppError> {
    let value = param.into_text();
    if value.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(state.storage.lookup_ids::<K>(&value).await?))
}

/// POST `{collection}`: insert a row. Duplicate values are allowed.
pub async fn create_row<K: ResourceKind>(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<K::Input>, AppError>,
) -> Result<(StatusCode, Json<K::Output>), AppError> {
    let value = input.validated()?;
    let row = state.storage.insert::<K>(&value).await?;
    info!(table = K::TABLE, id = row.id, "row created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT `{collection}/{id}?<param>=...`.
///
/// The new value travels in the query string, not the body; existing
/// clients depend on that, so it stays confined to this handler.
pub async fn update_from_query<K: ResourceKind>(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(param), _): WithRejection<Query<K::Param>, AppError>,
) -> Result<Json<K::Output>, AppError> {
    let value = param.validated()?;
    let row = state
        .storage
        .update_value::<K>(id, &value)
        .await?
        .ok_or(AppError::NotFound(K::LABEL))?;
    info!(table = K::TABLE, id, "row updated");
    Ok(Json(row.into()))
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub deleted: bool,
    pub id: i64,
}

/// DELETE `{collection}/{id}`.
pub async fn delete_row<K: ResourceKind>(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    if !state.storage.delete::<K>(id).await? {
        return Err(AppError::NotFound(K::LABEL));
    }
    info!(table = K::TABLE, id, "row deleted");
    Ok(Json(DeleteConfirmation { deleted: true, id }))
}
