//! Booking repository - persistence and conflict control for bookings.
//!
//! Create and approve run inside serializable transactions so the overlap
//! check and the write commit or fail together. The upstream system ran the
//! check and the write as separate statements, which let two concurrent
//! requests double-book a facility.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::booking::{self, Entity as BookingEntity};
use super::entities::facility::Entity as FacilityEntity;
use crate::config::{BOOKING_APPROVED, BOOKING_EXPIRED, BOOKING_PENDING};
use crate::domain::{Booking, BookingStatus, EquipmentStatus, NewBooking};
use crate::errors::{AppError, AppResult};

/// Booking repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Create a pending booking after an atomic conflict check.
    ///
    /// Fails with `Conflict` when another pending or approved booking on the
    /// same facility intersects `[start_time, end_time)`.
    async fn create(&self, data: NewBooking) -> AppResult<Booking>;

    /// Approve a pending booking after atomically re-validating the overlap
    /// predicate against other calendar-blocking bookings.
    async fn approve(&self, id: Uuid, admin_response: Option<String>) -> AppResult<Booking>;

    /// Write a status transition without conflict checking (deny, cancel).
    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        admin_response: Option<String>,
    ) -> AppResult<Booking>;

    /// Set the typed equipment preparation status.
    async fn set_equipment_status(&self, id: Uuid, status: EquipmentStatus) -> AppResult<Booking>;

    /// All bookings, newest first (admin view).
    async fn list_all(&self) -> AppResult<Vec<Booking>>;

    /// Pending bookings, oldest first (admin review queue).
    async fn list_pending(&self) -> AppResult<Vec<Booking>>;

    /// Approved bookings of anyone plus the given user's own bookings,
    /// with start times inside `[from, to]`.
    async fn list_visible(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;

    /// Mark approved bookings whose end time has passed as expired.
    /// Returns the bookings that were expired.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>>;
}

/// Concrete SeaORM-backed implementation of BookingRepository.
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin_serializable(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin_with_config(Some(IsolationLevel::Serializable), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)
    }

    /// Overlap predicate on calendar-blocking bookings for one facility:
    /// `existing.start < new.end AND existing.end > new.start`.
    ///
    /// SQL restatement of `domain::booking::intervals_overlap`; any change
    /// to one must be mirrored in the other.
    async fn find_conflict(
        txn: &DatabaseTransaction,
        facility_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<booking::Model>> {
        let mut query = BookingEntity::find()
            .filter(booking::Column::FacilityId.eq(facility_id))
            .filter(
                Condition::any()
                    .add(booking::Column::Status.eq(BOOKING_PENDING))
                    .add(booking::Column::Status.eq(BOOKING_APPROVED)),
            )
            .filter(booking::Column::StartTime.lt(end))
            .filter(booking::Column::EndTime.gt(start));

        if let Some(id) = exclude {
            query = query.filter(booking::Column::Id.ne(id));
        }

        query.one(txn).await.map_err(AppError::from)
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let model = BookingEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Booking::from))
    }

    async fn create(&self, data: NewBooking) -> AppResult<Booking> {
        let txn = self.begin_serializable().await?;

        let facility = FacilityEntity::find_by_id(data.facility_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        if !facility.is_active {
            return Err(AppError::validation("Facility is not available for booking"));
        }

        if Self::find_conflict(&txn, data.facility_id, data.start_time, data.end_time, None)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "The facility is already booked for the requested time range",
            ));
        }

        let now = Utc::now();
        let equipment = data
            .equipment
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::internal(format!("Failed to encode equipment: {}", e)))?;

        let active = booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            facility_id: Set(data.facility_id),
            start_time: Set(data.start_time),
            end_time: Set(data.end_time),
            purpose: Set(data.purpose),
            status: Set(BOOKING_PENDING.to_string()),
            equipment: Set(equipment),
            admin_response: Set(None),
            equipment_status: Set(None),
            arrival_confirmed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&txn).await?;
        txn.commit().await?;
        Ok(Booking::from(model))
    }

    async fn approve(&self, id: Uuid, admin_response: Option<String>) -> AppResult<Booking> {
        let txn = self.begin_serializable().await?;

        let existing = BookingEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let current = BookingStatus::from(existing.status.as_str());
        if !current.can_transition(BookingStatus::Approved) {
            return Err(AppError::validation(format!(
                "Cannot approve a {} booking",
                current
            )));
        }

        if Self::find_conflict(
            &txn,
            existing.facility_id,
            existing.start_time,
            existing.end_time,
            Some(existing.id),
        )
        .await?
        .is_some()
        {
            return Err(AppError::conflict(
                "Another booking now occupies this time range",
            ));
        }

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(BOOKING_APPROVED.to_string());
        if admin_response.is_some() {
            active.admin_response = Set(admin_response);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Booking::from(model))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        admin_response: Option<String>,
    ) -> AppResult<Booking> {
        let existing = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        if admin_response.is_some() {
            active.admin_response = Set(admin_response);
        }
        active.updated_at = Set(Utc::now());
        Ok(Booking::from(active.update(&self.db).await?))
    }

    async fn set_equipment_status(&self, id: Uuid, status: EquipmentStatus) -> AppResult<Booking> {
        let existing = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let value = serde_json::to_value(&status)
            .map_err(|e| AppError::internal(format!("Failed to encode equipment status: {}", e)))?;

        let mut active: booking::ActiveModel = existing.into();
        active.equipment_status = Set(Some(value));
        active.updated_at = Set(Utc::now());
        Ok(Booking::from(active.update(&self.db).await?))
    }

    async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .order_by_desc(booking::Column::StartTime)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .filter(booking::Column::Status.eq(BOOKING_PENDING))
            .order_by_asc(booking::Column::StartTime)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn list_visible(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .filter(booking::Column::StartTime.gte(from))
            .filter(booking::Column::StartTime.lte(to))
            .filter(
                Condition::any()
                    .add(booking::Column::Status.eq(BOOKING_APPROVED))
                    .add(booking::Column::UserId.eq(user_id)),
            )
            .order_by_asc(booking::Column::StartTime)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        let overdue = BookingEntity::find()
            .filter(booking::Column::Status.eq(BOOKING_APPROVED))
            .filter(booking::Column::EndTime.lt(now))
            .all(&self.db)
            .await?;

        let mut expired = Vec::with_capacity(overdue.len());
        for model in overdue {
            let mut active: booking::ActiveModel = model.into();
            active.status = Set(BOOKING_EXPIRED.to_string());
            active.updated_at = Set(now);
            expired.push(Booking::from(active.update(&self.db).await?));
        }
        Ok(expired)
    }
}
