use super::session::CurrentUser;
use super::success;
use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kindred_core::NewRelationship;

pub(crate) async fn create(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    body: Result<Json<NewRelationship>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let draft = body.validate()?;
    let relationship = state.store.create_relationship(draft).await?;
    tracing::info!(
        relationship_id = %relationship.id,
        kind = %relationship.kind,
        "created relationship"
    );
    Ok((StatusCode::CREATED, Json(relationship)))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_relationship(&id).await?;
    tracing::info!(relationship_id = %id, "deleted relationship");
    Ok(success())
}
