use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Support ticket document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,

    pub title: String,

    pub description: String,

    /// salary_issue, technical_support, fine_dispute, ...
    pub category: String,

    /// low, medium, high or urgent
    pub priority: String,

    /// open, in_progress, waiting_response, resolved, closed or deleted
    pub status: String,

    pub created_by: Uuid,

    pub assigned_to: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            priority: "medium".to_string(),
            status: "open".to_string(),
            created_by,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }
}
