use super::{created_within, matches_any, status_matches, SearchContext};
use crate::error::Result;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search user accounts by full name or email (admin only per policy)
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let mut users = ctx.db.users.find(|user| {
        user.is_active
            && status_matches(ctx.filters, None)
            && created_within(ctx.filters, user.created_at)
            && matches_any(
                pattern,
                [Some(user.full_name.as_str()), Some(user.email.as_str())],
            )
    });

    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    users.truncate(limit);

    Ok(users
        .into_iter()
        .map(|user| SearchResultItem {
            id: user.id,
            kind: EntityKind::User,
            title: user.full_name.clone(),
            subtitle: user.email.clone(),
            meta: json!({
                "role": user.role,
                "createdAt": user.created_at,
            }),
        })
        .collect())
}
