use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Principal role as resolved by the authentication layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    AffiliateManager,
    LeadManager,
    Agent,
    RefundsManager,
    InventoryManager,
    PendingApproval,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::AffiliateManager => "affiliate_manager",
            Role::LeadManager => "lead_manager",
            Role::Agent => "agent",
            Role::RefundsManager => "refunds_manager",
            Role::InventoryManager => "inventory_manager",
            Role::PendingApproval => "pending_approval",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "affiliate_manager" => Ok(Role::AffiliateManager),
            "lead_manager" => Ok(Role::LeadManager),
            "agent" => Ok(Role::Agent),
            "refunds_manager" => Ok(Role::RefundsManager),
            "inventory_manager" => Ok(Role::InventoryManager),
            "pending_approval" => Ok(Role::PendingApproval),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub full_name: String,

    pub email: String,

    pub role: Role,

    /// Deactivated accounts are excluded from search
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: email.into(),
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
