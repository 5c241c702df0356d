//! Facility repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::facility::{self, Entity as FacilityEntity};
use crate::domain::{Facility, FacilityChanges, NewFacility};
use crate::errors::{AppError, AppResult};

/// Facility repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Facility>>;

    /// List facilities by name; `include_inactive` is the admin view.
    async fn list(&self, include_inactive: bool) -> AppResult<Vec<Facility>>;

    async fn insert(&self, data: NewFacility) -> AppResult<Facility>;

    async fn update(&self, id: Uuid, changes: FacilityChanges) -> AppResult<Facility>;
}

/// Concrete SeaORM-backed implementation of FacilityRepository.
pub struct FacilityStore {
    db: DatabaseConnection,
}

impl FacilityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FacilityRepository for FacilityStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Facility>> {
        let model = FacilityEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Facility::from))
    }

    async fn list(&self, include_inactive: bool) -> AppResult<Vec<Facility>> {
        let mut query = FacilityEntity::find().order_by_asc(facility::Column::Name);
        if !include_inactive {
            query = query.filter(facility::Column::IsActive.eq(true));
        }
        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Facility::from).collect())
    }

    async fn insert(&self, data: NewFacility) -> AppResult<Facility> {
        let now = Utc::now();
        let active = facility::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            description: Set(data.description),
            capacity: Set(data.capacity),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(Facility::from(active.insert(&self.db).await?))
    }

    async fn update(&self, id: Uuid, changes: FacilityChanges) -> AppResult<Facility> {
        let existing = FacilityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: facility::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(capacity) = changes.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());
        Ok(Facility::from(active.update(&self.db).await?))
    }
}
