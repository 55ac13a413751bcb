use crate::api::{AppState, AuthUser};
use crate::error::{AppError, Result};
use crate::search::{SortOrder, TypeFilter};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuickSearchParams {
    #[validate(length(min = 2, message = "Search query must be at least 2 characters"))]
    pub q: String,

    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<u32>,

    pub types: Option<String>,
}

/// Quick search: bucketed, capped, cached
pub async fn quick_search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut params): Query<QuickSearchParams>,
) -> Result<Json<serde_json::Value>> {
    params.q = params.q.trim().to_string();
    params.validate()?;

    let limit = params
        .limit
        .map(|limit| limit as usize)
        .unwrap_or(state.limits.quick_limit_default);
    if limit > state.limits.quick_limit_max {
        return Err(AppError::Validation(format!(
            "Limit must be between 1 and {}",
            state.limits.quick_limit_max
        )));
    }
    let types = parse_types(params.types.as_deref());

    let payload = state
        .search
        .quick_search(user.id, user.role, &params.q, limit, &types)
        .await?;
    Ok(Json(payload))
}

#[derive(Debug, Deserialize, Validate)]
pub struct FullSearchParams {
    #[validate(length(min = 2, message = "Search query must be at least 2 characters"))]
    pub q: String,

    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<u32>,

    pub types: Option<String>,

    pub sort: Option<String>,
}

/// Full search: paginated, sortable, uncached
pub async fn full_search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut params): Query<FullSearchParams>,
) -> Result<Json<serde_json::Value>> {
    params.q = params.q.trim().to_string();
    params.validate()?;

    let page = params.page.map(|page| page as usize).unwrap_or(1);
    let limit = params
        .limit
        .map(|limit| limit as usize)
        .unwrap_or(state.limits.full_limit_default);
    if limit > state.limits.full_limit_max {
        return Err(AppError::Validation(format!(
            "Limit must be between 1 and {}",
            state.limits.full_limit_max
        )));
    }
    let types = parse_types(params.types.as_deref());
    let sort = match params.sort.as_deref() {
        None => SortOrder::default(),
        Some(raw) => raw
            .parse::<SortOrder>()
            .map_err(|_| AppError::Validation("Sort must be relevance, date or name".to_string()))?,
    };

    let payload = state
        .search
        .full_search(user.id, user.role, &params.q, page, limit, &types, sort)
        .await?;
    Ok(Json(payload))
}

/// The caller's recent searches, newest first
pub async fn get_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>> {
    let entries = state
        .history
        .user_history(user.id, state.history.page_limit())
        .await?;
    Ok(Json(json!({
        "success": true,
        "data": entries,
    })))
}

/// Delete one history entry owned by the caller
pub async fn delete_history_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.history.delete_entry(user.id, entry_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Search history entry deleted",
    })))
}

/// Clear all of the caller's history
pub async fn clear_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.history.clear(user.id).await?;
    Ok(Json(json!({
        "success": true,
        "deletedCount": deleted,
    })))
}

/// Parse the `types` CSV into a type restriction
///
/// Unknown tags do not match any entity kind, but they still count as a
/// restriction: `types=bogus` searches nothing, it does not widen to all.
fn parse_types(raw: Option<&str>) -> TypeFilter {
    let mut filter = TypeFilter::default();
    if let Some(raw) = raw {
        for tag in raw.split(',') {
            filter.add_tag(tag);
        }
    }
    filter
}
