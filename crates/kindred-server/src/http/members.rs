use super::session::CurrentUser;
use super::success;
use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kindred_core::{MemberPatch, NewMember, TreeSnapshot};

pub(crate) async fn list(State(state): State<AppState>) -> Json<TreeSnapshot> {
    Json(state.store.snapshot().await)
}

pub(crate) async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<NewMember>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let draft = body.validate()?;
    let member = state.store.create_member(draft).await;
    tracing::info!(member_id = %member.id, user_id = %user.id, "created member");
    Ok((StatusCode::CREATED, Json(member)))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<MemberPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(patch) = body?;
    let member = state.store.update_member(&id, patch).await?;
    tracing::info!(member_id = %member.id, "updated member");
    Ok(Json(member))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cascaded = state.store.delete_member(&id).await?;
    tracing::info!(member_id = %id, cascaded, "deleted member");
    Ok(success())
}
