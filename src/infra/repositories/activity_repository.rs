//! Activity log repository - append-only audit trail.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::activity_log::{self, Entity as ActivityLogEntity};
use crate::domain::{ActivityLog, NewActivityLog};
use crate::errors::AppResult;
use crate::types::PaginationParams;

/// Activity log repository trait for dependency injection.
/// Rows are append-only; there are no update or delete operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn insert(&self, data: NewActivityLog) -> AppResult<ActivityLog>;

    /// List entries, newest first.
    async fn list_paginated(&self, params: PaginationParams)
        -> AppResult<(Vec<ActivityLog>, u64)>;
}

/// Concrete SeaORM-backed implementation of ActivityLogRepository.
pub struct ActivityLogStore {
    db: DatabaseConnection,
}

impl ActivityLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityLogRepository for ActivityLogStore {
    async fn insert(&self, data: NewActivityLog) -> AppResult<ActivityLog> {
        let active = activity_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            action: Set(data.action),
            details: Set(data.details),
            ip_address: Set(data.ip_address),
            user_agent: Set(data.user_agent),
            created_at: Set(Utc::now()),
        };
        Ok(ActivityLog::from(active.insert(&self.db).await?))
    }

    async fn list_paginated(
        &self,
        params: PaginationParams,
    ) -> AppResult<(Vec<ActivityLog>, u64)> {
        let paginator = ActivityLogEntity::find()
            .order_by_desc(activity_log::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(ActivityLog::from).collect(), total))
    }
}
