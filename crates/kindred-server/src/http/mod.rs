//! Route handlers, grouped by resource.

pub(crate) mod auth;
pub(crate) mod layout;
pub(crate) mod members;
pub(crate) mod relationships;
pub(crate) mod session;
pub(crate) mod uploads;

use axum::Json;
use serde_json::{Value, json};

pub(crate) async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}
