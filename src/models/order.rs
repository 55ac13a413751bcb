use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lead order document
///
/// Requester and campaign are stored as references; their display names are
/// populated from the user/campaign collections at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    /// fulfilled, partial, pending or cancelled
    pub status: String,

    pub requester: Uuid,

    pub campaign: Option<Uuid>,

    pub country_filter: Option<String>,

    /// Requested lead count across all lead types
    pub requests: u32,

    /// Fulfilled lead count across all lead types
    pub fulfilled: u32,

    pub planned_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(requester: Uuid, requests: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: "pending".to_string(),
            requester,
            campaign: None,
            country_filter: None,
            requests,
            fulfilled: 0,
            planned_date: None,
            created_at: Utc::now(),
        }
    }

    /// Uppercased tail of the id, used as the human-facing order number
    pub fn short_id(&self) -> String {
        let id = self.id.simple().to_string();
        id[id.len() - 6..].to_uppercase()
    }
}
