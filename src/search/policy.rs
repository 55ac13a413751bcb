//! Role-scoped entity visibility
//!
//! Decides which entity kinds a role may search at all. Row-level narrowing
//! (agents only see their own leads, non-admins only their own tickets) lives
//! inside each adapter; this module only gates the adapter set.

use crate::models::Role;
use crate::search::types::EntityKind;

/// Whether the role may search the given entity kind at all
pub fn is_entity_allowed(role: Role, kind: EntityKind) -> bool {
    match kind {
        EntityKind::Lead => matches!(
            role,
            Role::Admin | Role::AffiliateManager | Role::LeadManager | Role::Agent
        ),
        EntityKind::Order => matches!(
            role,
            Role::Admin | Role::AffiliateManager | Role::LeadManager
        ),
        EntityKind::User => matches!(role, Role::Admin),
        EntityKind::Campaign => matches!(
            role,
            Role::Admin | Role::AffiliateManager | Role::LeadManager
        ),
        // Every authenticated role may search tickets and announcements;
        // the adapters narrow rows to the requester's own.
        EntityKind::Ticket => true,
        EntityKind::Announcement => true,
        EntityKind::ClientBroker | EntityKind::ClientNetwork | EntityKind::OurNetwork => {
            matches!(role, Role::Admin)
        }
    }
}

/// All entity kinds the role may search, in dispatch order
pub fn permitted_kinds(role: Role) -> Vec<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .filter(|kind| is_entity_allowed(role, *kind))
        .collect()
}

/// Intersect the role-permitted kinds with an explicit request. A requested
/// kind outside the permitted set is silently dropped, never widened into;
/// callers that carry no restriction use `permitted_kinds` directly.
pub fn resolve_kinds(role: Role, requested: &[EntityKind]) -> Vec<EntityKind> {
    permitted_kinds(role)
        .into_iter()
        .filter(|kind| requested.contains(kind))
        .collect()
}
