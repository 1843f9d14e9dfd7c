use crate::AppState;
use crate::auth::{Session, User, cleared_session_cookie, session_cookie, session_token};
use crate::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignUpBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignInBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn with_session(status: StatusCode, state: &AppState, user: User, session: Session) -> Response {
    let cookie = session_cookie(&session.token, state.auth.session_ttl());
    let body = json!({ "user": user, "token": session.token, "expiresAt": session.expires_at });
    (status, [(SET_COOKIE, cookie)], Json(body)).into_response()
}

pub(crate) async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let (user, session) = state
        .auth
        .sign_up(&body.email, &body.password, &body.name)
        .await?;
    Ok(with_session(StatusCode::OK, &state, user, session))
}

pub(crate) async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let (user, session) = state.auth.sign_in(&body.email, &body.password).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(with_session(StatusCode::OK, &state, user, session))
}

pub(crate) async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.auth.sign_out(&token).await;
    }
    (
        [(SET_COOKIE, cleared_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

pub(crate) async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let Some(token) = session_token(&headers) else {
        return Json(Value::Null);
    };
    match state.auth.user_for_token(&token).await {
        Some((user, session)) => Json(json!({
            "user": user,
            "session": { "userId": session.user_id, "expiresAt": session.expires_at },
        })),
        None => Json(Value::Null),
    }
}
