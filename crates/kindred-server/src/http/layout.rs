use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::extract::{Query, State};
use kindred_layout::{GenerationPolicy, Layout, LayoutOptions, RankDir, compute_layout_snapshot};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LayoutQuery {
    policy: Option<String>,
    rankdir: Option<String>,
}

impl LayoutQuery {
    fn options(&self) -> Result<LayoutOptions, ApiError> {
        let mut options = LayoutOptions::default();
        if let Some(raw) = self.policy.as_deref() {
            options.policy = raw.parse::<GenerationPolicy>().map_err(|_| {
                ApiError::bad_request(format!("policy must be first-wins or deepest, got {raw:?}"))
            })?;
        }
        if let Some(raw) = self.rankdir.as_deref() {
            options.rank_dir = raw.parse::<RankDir>().map_err(|_| {
                ApiError::bad_request(format!("rankdir must be TB, BT, LR or RL, got {raw:?}"))
            })?;
        }
        Ok(options)
    }
}

pub(crate) async fn layout(
    State(state): State<AppState>,
    Query(query): Query<LayoutQuery>,
) -> Result<Json<Layout>, ApiError> {
    let options = query.options()?;
    let snapshot = state.store.snapshot().await;
    let layout = compute_layout_snapshot(&snapshot, &options);
    if !layout.diagnostics.is_clean() {
        tracing::warn!(
            dangling = layout.diagnostics.dangling.len(),
            self_loops = layout.diagnostics.self_loops.len(),
            "layout tolerated inconsistent relationships"
        );
    }
    Ok(Json(layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_and_overrides() {
        let options = LayoutQuery::default().options().unwrap();
        assert_eq!(options, LayoutOptions::default());

        let query = LayoutQuery {
            policy: Some("deepest".to_string()),
            rankdir: Some("lr".to_string()),
        };
        let options = query.options().unwrap();
        assert_eq!(options.policy, GenerationPolicy::Deepest);
        assert_eq!(options.rank_dir, RankDir::LR);

        let query = LayoutQuery {
            policy: Some("sideways".to_string()),
            rankdir: None,
        };
        assert_eq!(query.options().unwrap_err().status.as_u16(), 400);
    }
}
