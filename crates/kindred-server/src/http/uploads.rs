use super::session::CurrentUser;
use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde_json::json;

const FILE_FIELD: &str = "file";

pub(crate) async fn upload(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original = field.file_name().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        let name = state.uploads.save(original.as_deref(), &bytes).await?;
        let body = json!({ "url": format!("/uploads/{name}") });
        return Ok((StatusCode::CREATED, Json(body)).into_response());
    }
    Err(ApiError::bad_request("No file uploaded"))
}

pub(crate) async fn serve(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.uploads.read(&name).await?.ok_or_else(ApiError::not_found)?;
    let content_type = crate::uploads::content_type_for(&name);
    Ok(([(CONTENT_TYPE, content_type)], bytes).into_response())
}
