//! Append-only activity log entries for the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An audit trail row. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for a new activity log entry.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Activity log response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(l: ActivityLog) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            action: l.action,
            details: l.details,
            ip_address: l.ip_address,
            user_agent: l.user_agent,
            created_at: l.created_at,
        }
    }
}
