use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company announcement document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,

    pub title: String,

    pub message: String,

    /// Roles this announcement is visible to
    pub target_roles: Vec<Role>,

    /// low, medium, high or urgent
    pub priority: String,

    pub created_by: Uuid,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        target_roles: Vec<Role>,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            target_roles,
            priority: "medium".to_string(),
            created_by,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
