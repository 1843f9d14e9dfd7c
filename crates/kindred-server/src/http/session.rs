use crate::AppState;
use crate::auth::{User, session_token};
use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The signed-in user. Rejects with 401 when no live session accompanies the request.
#[derive(Debug, Clone)]
pub(crate) struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(ApiError::unauthorized)?;
        let (user, _) = state
            .auth
            .user_for_token(&token)
            .await
            .ok_or_else(ApiError::unauthorized)?;
        Ok(Self(user))
    }
}
