use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Call-center lead document
///
/// Email/phone pairs carry both the original (scraped) and the current
/// contact values, so both generations stay searchable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,

    /// ftd, filler or cold
    pub lead_type: String,

    pub first_name: String,

    pub last_name: String,

    pub new_email: String,

    pub old_email: Option<String>,

    pub new_phone: String,

    pub old_phone: Option<String>,

    pub country: String,

    pub status: String,

    /// Denormalized campaign display name
    pub campaign: Option<String>,

    /// Denormalized client-broker display name
    pub client_broker: Option<String>,

    pub source: Option<String>,

    pub assigned_agent: Option<Uuid>,

    /// Archived leads never surface in search
    pub is_archived: bool,

    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        new_email: impl Into<String>,
        new_phone: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lead_type: "cold".to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            new_email: new_email.into(),
            old_email: None,
            new_phone: new_phone.into(),
            old_phone: None,
            country: country.into(),
            status: "active".to_string(),
            campaign: None,
            client_broker: None,
            source: None,
            assigned_agent: None,
            is_archived: false,
            created_at: Utc::now(),
        }
    }
}
