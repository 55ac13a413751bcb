use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketing campaign document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub status: String,

    pub country: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            status: "active".to_string(),
            country: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
