use super::{created_within, matches_any, status_matches, truncate_subtitle, SearchContext};
use crate::error::Result;
use crate::models::Role;
use crate::search::types::{EntityKind, SearchResultItem};
use regex::Regex;
use serde_json::json;

/// Search announcements by title or message body
///
/// Non-admins only see announcements targeted at their own role.
pub async fn search(
    ctx: &SearchContext<'_>,
    pattern: &Regex,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let targeted_only = ctx.role != Role::Admin;
    let role = ctx.role;

    let mut announcements = ctx.db.announcements.find(|announcement| {
        announcement.is_active
            && (!targeted_only || announcement.target_roles.contains(&role))
            && status_matches(ctx.filters, None)
            && created_within(ctx.filters, announcement.created_at)
            && matches_any(
                pattern,
                [
                    Some(announcement.title.as_str()),
                    Some(announcement.message.as_str()),
                ],
            )
    });

    announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    announcements.truncate(limit);

    Ok(announcements
        .into_iter()
        .map(|announcement| SearchResultItem {
            id: announcement.id,
            kind: EntityKind::Announcement,
            title: announcement.title.clone(),
            subtitle: truncate_subtitle(&announcement.message, 80),
            meta: json!({
                "priority": announcement.priority,
                "targetRoles": announcement.target_roles,
                "createdAt": announcement.created_at,
            }),
        })
        .collect())
}
