//! Email/password accounts with cookie sessions.
//!
//! Users and sessions live in memory. Passwords are stored as salted SHA-256 digests and session
//! tokens are random UUIDs, carried in the `kindred_session` cookie or an `Authorization: Bearer`
//! header.

use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "kindred_session";
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Name is required")]
    MissingName,

    #[error("User already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    salt: String,
    password_hash: String,
}

#[derive(Debug)]
pub struct AuthService {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Session>>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(User, Session), AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }

        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailTaken);
            }
            let salt = uuid::Uuid::new_v4().simple().to_string();
            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.clone(),
                name: name.to_string(),
                created_at: Utc::now(),
            };
            accounts.insert(
                email,
                Account {
                    user: user.clone(),
                    password_hash: hash_password(&salt, password),
                    salt,
                },
            );
            user
        };

        tracing::info!(user_id = %user.id, "registered user");
        let session = self.open_session(&user).await;
        Ok((user, session))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(User, Session), AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = {
            let accounts = self.accounts.read().await;
            let account = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;
            if hash_password(&account.salt, password) != account.password_hash {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };
        let session = self.open_session(&user).await;
        Ok((user, session))
    }

    pub async fn sign_out(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Resolves a session token to its user, dropping the session if it has expired.
    pub async fn user_for_token(&self, token: &str) -> Option<(User, Session)> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(token).cloned()?
        };
        if session.expires_at <= Utc::now() {
            self.sessions.write().await.remove(token);
            return None;
        }
        let accounts = self.accounts.read().await;
        let user = accounts
            .values()
            .find(|a| a.user.id == session.user_id)
            .map(|a| a.user.clone())?;
        Some((user, session))
    }

    async fn open_session(&self, user: &User) -> Session {
        let ttl = chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(7));
        let now = Utc::now();
        let session = Session {
            token: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            expires_at: now + ttl,
        };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session.token.clone(), session.clone());
        session
    }
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') =>
        {
            Ok(email)
        }
        _ => Err(AuthError::InvalidEmail),
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Session token from the `Authorization: Bearer` header or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(bearer) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        let bearer = bearer.trim();
        if !bearer.is_empty() {
            return Some(bearer.to_string());
        }
    }
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}

pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
