//! Entity kinds and the uniform search result envelope

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The nine searchable entity kinds
///
/// `ALL` doubles as the fixed dispatch order: full-search "relevance" is the
/// concatenation order of adapter output, so this ordering is part of the
/// API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Lead,
    Order,
    User,
    Campaign,
    Ticket,
    Announcement,
    ClientBroker,
    ClientNetwork,
    OurNetwork,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Lead,
        EntityKind::Order,
        EntityKind::User,
        EntityKind::Campaign,
        EntityKind::Ticket,
        EntityKind::Announcement,
        EntityKind::ClientBroker,
        EntityKind::ClientNetwork,
        EntityKind::OurNetwork,
    ];

    /// Singular tag used in `type:` directives and the `types` parameter
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Order => "order",
            EntityKind::User => "user",
            EntityKind::Campaign => "campaign",
            EntityKind::Ticket => "ticket",
            EntityKind::Announcement => "announcement",
            EntityKind::ClientBroker => "clientbroker",
            EntityKind::ClientNetwork => "clientnetwork",
            EntityKind::OurNetwork => "ournetwork",
        }
    }

    /// Plural key used for response buckets and count maps
    pub fn bucket(&self) -> &'static str {
        match self {
            EntityKind::Lead => "leads",
            EntityKind::Order => "orders",
            EntityKind::User => "users",
            EntityKind::Campaign => "campaigns",
            EntityKind::Ticket => "tickets",
            EntityKind::Announcement => "announcements",
            EntityKind::ClientBroker => "clientBrokers",
            EntityKind::ClientNetwork => "clientNetworks",
            EntityKind::OurNetwork => "ourNetworks",
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts the lowercased directive tag; camelCase API spellings fold in
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" | "leads" => Ok(EntityKind::Lead),
            "order" | "orders" => Ok(EntityKind::Order),
            "user" | "users" => Ok(EntityKind::User),
            "campaign" | "campaigns" => Ok(EntityKind::Campaign),
            "ticket" | "tickets" => Ok(EntityKind::Ticket),
            "announcement" | "announcements" => Ok(EntityKind::Announcement),
            "clientbroker" | "clientbrokers" => Ok(EntityKind::ClientBroker),
            "clientnetwork" | "clientnetworks" => Ok(EntityKind::ClientNetwork),
            "ournetwork" | "ournetworks" => Ok(EntityKind::OurNetwork),
            other => Err(format!("unknown entity type: {other}")),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Explicit entity-type restriction for one request
///
/// Tracks whether any tag was supplied at all: a filter made entirely of
/// unknown tags is still a restriction, and it restricts to nothing rather
/// than falling back to every permitted kind.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    kinds: Vec<EntityKind>,
    restricted: bool,
}

impl TypeFilter {
    /// Add one requested tag; unknown tags still mark the filter restricted
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        self.restricted = true;
        if let Ok(kind) = tag.parse::<EntityKind>() {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
    }

    /// Whether any tag, known or not, was supplied
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// The recognized kinds, deduplicated, in request order
    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }
}

/// Uniform projection every adapter produces
///
/// `meta` is entity-specific; consumers pattern-match on `type` to know which
/// keys exist. Every adapter includes `createdAt` so the full-search date
/// sort has a common key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: EntityKind,

    pub title: String,

    pub subtitle: String,

    pub meta: serde_json::Value,
}
