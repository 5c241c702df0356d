//! Facility service - admin-managed facility catalogue.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::Actor;
use crate::domain::{Facility, FacilityChanges, NewActivityLog, NewFacility};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Facility service trait for dependency injection.
#[async_trait]
pub trait FacilityService: Send + Sync {
    /// List facilities; `include_inactive` is the admin view.
    async fn list_facilities(&self, include_inactive: bool) -> AppResult<Vec<Facility>>;

    async fn get_facility(&self, id: Uuid) -> AppResult<Facility>;

    async fn create_facility(&self, actor: Actor, data: NewFacility) -> AppResult<Facility>;

    async fn update_facility(
        &self,
        actor: Actor,
        id: Uuid,
        changes: FacilityChanges,
    ) -> AppResult<Facility>;
}

/// Concrete implementation of FacilityService using Unit of Work.
pub struct FacilityManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FacilityManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn record_activity(&self, entry: NewActivityLog) {
        if let Err(e) = self.uow.activity().insert(entry).await {
            tracing::warn!(error = %e, "Failed to write activity log entry");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> FacilityService for FacilityManager<U> {
    async fn list_facilities(&self, include_inactive: bool) -> AppResult<Vec<Facility>> {
        self.uow.facilities().list(include_inactive).await
    }

    async fn get_facility(&self, id: Uuid) -> AppResult<Facility> {
        self.uow.facilities().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_facility(&self, actor: Actor, data: NewFacility) -> AppResult<Facility> {
        if data.capacity <= 0 {
            return Err(AppError::validation("capacity must be positive"));
        }

        let facility = self.uow.facilities().insert(data).await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "facility.create".to_string(),
            details: Some(format!("Created facility {} ({})", facility.name, facility.id)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        Ok(facility)
    }

    async fn update_facility(
        &self,
        actor: Actor,
        id: Uuid,
        changes: FacilityChanges,
    ) -> AppResult<Facility> {
        if matches!(changes.capacity, Some(c) if c <= 0) {
            return Err(AppError::validation("capacity must be positive"));
        }

        let facility = self.uow.facilities().update(id, changes).await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "facility.update".to_string(),
            details: Some(format!("Updated facility {}", id)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        Ok(facility)
    }
}
