use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// External broker a client network routes leads through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientBroker {
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub country: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl ClientBroker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            country: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Client-side affiliate network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientNetwork {
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl ClientNetwork {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// In-house affiliate network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OurNetwork {
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub assigned_affiliate_manager: Option<Uuid>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl OurNetwork {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            assigned_affiliate_manager: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
