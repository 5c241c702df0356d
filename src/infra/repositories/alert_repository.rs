//! System alert repository.
//!
//! Queries are scoped by owner at the database, not filtered from a full
//! table scan in memory as the upstream system did.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::system_alert::{self, Entity as AlertEntity};
use crate::domain::{NewAlert, SystemAlert};
use crate::errors::{AppError, AppResult};

/// Alert repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SystemAlert>>;

    async fn insert(&self, data: NewAlert) -> AppResult<SystemAlert>;

    /// Admin/global alerts (`user_id IS NULL`), newest first.
    async fn list_global(&self) -> AppResult<Vec<SystemAlert>>;

    /// Alerts scoped to one user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<SystemAlert>>;

    async fn mark_read(&self, id: Uuid) -> AppResult<SystemAlert>;

    /// Mark all of a user's unread equipment alerts as read, returning the
    /// number retired. Compensates for equipment status being re-announced
    /// on every needs update.
    async fn retire_equipment_for_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Concrete SeaORM-backed implementation of AlertRepository.
pub struct AlertStore {
    db: DatabaseConnection,
}

impl AlertStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertRepository for AlertStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SystemAlert>> {
        let model = AlertEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(SystemAlert::from))
    }

    async fn insert(&self, data: NewAlert) -> AppResult<SystemAlert> {
        let now = Utc::now();
        let metadata = data
            .metadata
            .map(|m| serde_json::to_value(&m))
            .transpose()
            .map_err(|e| AppError::internal(format!("Failed to encode alert metadata: {}", e)))?;

        let active = system_alert::ActiveModel {
            id: Set(Uuid::new_v4()),
            alert_type: Set(data.alert_type),
            severity: Set(data.severity.to_string()),
            title: Set(data.title),
            message: Set(data.message),
            metadata: Set(metadata),
            user_id: Set(data.user_id),
            is_read: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(SystemAlert::from(active.insert(&self.db).await?))
    }

    async fn list_global(&self) -> AppResult<Vec<SystemAlert>> {
        let models = AlertEntity::find()
            .filter(system_alert::Column::UserId.is_null())
            .order_by_desc(system_alert::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(SystemAlert::from).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<SystemAlert>> {
        let models = AlertEntity::find()
            .filter(system_alert::Column::UserId.eq(user_id))
            .order_by_desc(system_alert::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(SystemAlert::from).collect())
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<SystemAlert> {
        let existing = AlertEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: system_alert::ActiveModel = existing.into();
        active.is_read = Set(true);
        active.updated_at = Set(Utc::now());
        Ok(SystemAlert::from(active.update(&self.db).await?))
    }

    async fn retire_equipment_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let unread = AlertEntity::find()
            .filter(system_alert::Column::UserId.eq(user_id))
            .filter(system_alert::Column::IsRead.eq(false))
            .all(&self.db)
            .await?;

        let now = Utc::now();
        let mut retired = 0u64;
        for model in unread {
            let is_equipment = SystemAlert::from(model.clone())
                .metadata
                .is_some_and(|m| m.is_equipment());
            if !is_equipment {
                continue;
            }
            let mut active: system_alert::ActiveModel = model.into();
            active.is_read = Set(true);
            active.updated_at = Set(now);
            active.update(&self.db).await?;
            retired += 1;
        }
        Ok(retired)
    }
}
