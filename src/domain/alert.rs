//! System alerts: global (admin-facing) and per-user notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::booking::EquipmentStatus;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl From<&str> for AlertSeverity {
    fn from(s: &str) -> Self {
        match s {
            "warning" => AlertSeverity::Warning,
            "critical" => AlertSeverity::Critical,
            _ => AlertSeverity::Info,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Typed alert payload.
///
/// Replaces the upstream practice of embedding JSON fragments inside the
/// human-readable message and recovering them with regexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertMetadata {
    Equipment {
        booking_id: Uuid,
        #[serde(flatten)]
        status: EquipmentStatus,
    },
    Plain,
}

impl AlertMetadata {
    pub fn is_equipment(&self) -> bool {
        matches!(self, AlertMetadata::Equipment { .. })
    }
}

/// A notification row. `user_id = None` denotes an admin/global alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemAlert {
    pub id: Uuid,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub metadata: Option<AlertMetadata>,
    pub user_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SystemAlert {
    /// Stale equipment notices are hidden once read rather than deleted.
    pub fn is_stale_equipment(&self) -> bool {
        self.is_read && self.metadata.as_ref().is_some_and(|m| m.is_equipment())
    }
}

/// Data for a new alert row.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub metadata: Option<AlertMetadata>,
    /// None creates an admin/global alert.
    pub user_id: Option<Uuid>,
}

/// Alert response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertResponse {
    pub id: Uuid,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AlertMetadata>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SystemAlert> for AlertResponse {
    fn from(a: SystemAlert) -> Self {
        Self {
            id: a.id,
            alert_type: a.alert_type,
            severity: a.severity,
            title: a.title,
            message: a.message,
            metadata: a.metadata,
            is_read: a.is_read,
            created_at: a.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::EquipmentState;

    fn alert(is_read: bool, metadata: Option<AlertMetadata>) -> SystemAlert {
        let now = Utc::now();
        SystemAlert {
            id: Uuid::new_v4(),
            alert_type: "equipment".to_string(),
            severity: AlertSeverity::Info,
            title: "Equipment update".to_string(),
            message: "Projector prepared".to_string(),
            metadata,
            user_id: Some(Uuid::new_v4()),
            is_read,
            created_at: now,
            updated_at: now,
        }
    }

    fn equipment_metadata() -> AlertMetadata {
        AlertMetadata::Equipment {
            booking_id: Uuid::new_v4(),
            status: EquipmentStatus {
                status: EquipmentState::Prepared,
                note: None,
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn read_equipment_alert_is_stale() {
        assert!(alert(true, Some(equipment_metadata())).is_stale_equipment());
    }

    #[test]
    fn unread_equipment_alert_is_not_stale() {
        assert!(!alert(false, Some(equipment_metadata())).is_stale_equipment());
    }

    #[test]
    fn read_plain_alert_is_not_stale() {
        assert!(!alert(true, Some(AlertMetadata::Plain)).is_stale_equipment());
        assert!(!alert(true, None).is_stale_equipment());
    }
}
