//! SeaORM entity for the system_alerts table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::{AlertSeverity, SystemAlert};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "system_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub message: String,
    /// Typed JSON payload, see `domain::AlertMetadata`.
    pub metadata: Option<Json>,
    /// NULL means the alert is admin/global.
    pub user_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SystemAlert {
    fn from(m: Model) -> Self {
        SystemAlert {
            id: m.id,
            alert_type: m.alert_type,
            severity: AlertSeverity::from(m.severity.as_str()),
            title: m.title,
            message: m.message,
            metadata: m.metadata.and_then(|v| serde_json::from_value(v).ok()),
            user_id: m.user_id,
            is_read: m.is_read,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
