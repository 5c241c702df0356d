//! Booking service - booking lifecycle, conflict handling and side effects.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::Actor;
use crate::config::{BOOKING_WINDOW_FUTURE_DAYS, BOOKING_WINDOW_PAST_DAYS};
use crate::domain::{
    AlertMetadata, AlertSeverity, Booking, BookingStatus, EquipmentState, EquipmentStatus,
    NewActivityLog, NewAlert, NewBooking,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Booking creation request as accepted from the owner.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub equipment: Option<Vec<String>>,
}

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Create a pending booking for the actor. Conflicting time ranges on
    /// the same facility are rejected.
    async fn create_booking(&self, actor: Actor, request: BookingRequest) -> AppResult<Booking>;

    /// Admin: every booking. Student: approved bookings plus their own,
    /// inside the rolling -7/+14 day window.
    async fn list_bookings(&self, viewer_id: Uuid, is_admin: bool) -> AppResult<Vec<Booking>>;

    /// Pending bookings awaiting review (admin).
    async fn list_pending(&self) -> AppResult<Vec<Booking>>;

    /// Approve a pending booking (admin).
    async fn approve_booking(
        &self,
        actor: Actor,
        booking_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Booking>;

    /// Deny a pending booking with a response note (admin).
    async fn deny_booking(
        &self,
        actor: Actor,
        booking_id: Uuid,
        response: String,
    ) -> AppResult<Booking>;

    /// Cancel a booking. Owners may cancel their own; admins any.
    async fn cancel_booking(
        &self,
        actor: Actor,
        actor_is_admin: bool,
        booking_id: Uuid,
    ) -> AppResult<Booking>;

    /// Record equipment preparation status (admin). Retires the owner's
    /// stale equipment alerts and raises exactly one new one.
    async fn update_needs(
        &self,
        actor: Actor,
        booking_id: Uuid,
        state: EquipmentState,
        note: Option<String>,
    ) -> AppResult<Booking>;

    /// Expire approved bookings whose end time has passed. Returns the
    /// number of bookings expired.
    async fn expire_overdue(&self) -> AppResult<u64>;
}

/// Concrete implementation of BookingService using Unit of Work.
pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn record_activity(&self, entry: NewActivityLog) {
        if let Err(e) = self.uow.activity().insert(entry).await {
            tracing::warn!(error = %e, "Failed to write activity log entry");
        }
    }

    async fn notify(&self, alert: NewAlert) {
        if let Err(e) = self.uow.alerts().insert(alert).await {
            tracing::warn!(error = %e, "Failed to write user alert");
        }
    }

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking> {
        self.uow.bookings().find_by_id(id).await?.ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create_booking(&self, actor: Actor, request: BookingRequest) -> AppResult<Booking> {
        let now = Utc::now();
        if request.end_time <= request.start_time {
            return Err(AppError::validation("end_time must be after start_time"));
        }
        if request.start_time < now {
            return Err(AppError::validation("start_time must be in the future"));
        }
        if request.purpose.trim().is_empty() {
            return Err(AppError::validation("A booking purpose is required"));
        }

        let booking = self
            .uow
            .bookings()
            .create(NewBooking {
                user_id: actor.id,
                facility_id: request.facility_id,
                start_time: request.start_time,
                end_time: request.end_time,
                purpose: request.purpose,
                equipment: request.equipment,
            })
            .await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "booking.create".to_string(),
            details: Some(format!(
                "Requested facility {} from {} to {}",
                booking.facility_id, booking.start_time, booking.end_time
            )),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        Ok(booking)
    }

    async fn list_bookings(&self, viewer_id: Uuid, is_admin: bool) -> AppResult<Vec<Booking>> {
        if is_admin {
            return self.uow.bookings().list_all().await;
        }

        let now = Utc::now();
        let from = now - Duration::days(BOOKING_WINDOW_PAST_DAYS);
        let to = now + Duration::days(BOOKING_WINDOW_FUTURE_DAYS);
        self.uow.bookings().list_visible(viewer_id, from, to).await
    }

    async fn list_pending(&self) -> AppResult<Vec<Booking>> {
        self.uow.bookings().list_pending().await
    }

    async fn approve_booking(
        &self,
        actor: Actor,
        booking_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Booking> {
        let booking = self.uow.bookings().approve(booking_id, response).await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "booking.approve".to_string(),
            details: Some(format!("Approved booking {}", booking_id)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        self.notify(NewAlert {
            alert_type: "booking".to_string(),
            severity: AlertSeverity::Info,
            title: "Booking approved".to_string(),
            message: format!(
                "Your booking from {} to {} has been approved.",
                booking.start_time.format("%Y-%m-%d %H:%M"),
                booking.end_time.format("%H:%M")
            ),
            metadata: None,
            user_id: Some(booking.user_id),
        })
        .await;

        Ok(booking)
    }

    async fn deny_booking(
        &self,
        actor: Actor,
        booking_id: Uuid,
        response: String,
    ) -> AppResult<Booking> {
        let existing = self.get_booking(booking_id).await?;
        if !existing.status.can_transition(BookingStatus::Denied) {
            return Err(AppError::validation(format!(
                "Cannot deny a {} booking",
                existing.status
            )));
        }

        let booking = self
            .uow
            .bookings()
            .set_status(booking_id, BookingStatus::Denied, Some(response.clone()))
            .await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "booking.deny".to_string(),
            details: Some(format!("Denied booking {}: {}", booking_id, response)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        self.notify(NewAlert {
            alert_type: "booking".to_string(),
            severity: AlertSeverity::Info,
            title: "Booking denied".to_string(),
            message: format!("Your booking request was denied: {}", response),
            metadata: None,
            user_id: Some(booking.user_id),
        })
        .await;

        Ok(booking)
    }

    async fn cancel_booking(
        &self,
        actor: Actor,
        actor_is_admin: bool,
        booking_id: Uuid,
    ) -> AppResult<Booking> {
        let existing = self.get_booking(booking_id).await?;
        if existing.user_id != actor.id && !actor_is_admin {
            return Err(AppError::Forbidden);
        }
        if !existing.status.can_transition(BookingStatus::Cancelled) {
            return Err(AppError::validation(format!(
                "Cannot cancel a {} booking",
                existing.status
            )));
        }

        let booking = self
            .uow
            .bookings()
            .set_status(booking_id, BookingStatus::Cancelled, None)
            .await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "booking.cancel".to_string(),
            details: Some(format!("Cancelled booking {}", booking_id)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        // Owners already know they cancelled; only notify on admin action.
        if booking.user_id != actor.id {
            self.notify(NewAlert {
                alert_type: "booking".to_string(),
                severity: AlertSeverity::Warning,
                title: "Booking cancelled".to_string(),
                message: format!(
                    "Your booking on {} was cancelled by an administrator.",
                    booking.start_time.format("%Y-%m-%d")
                ),
                metadata: None,
                user_id: Some(booking.user_id),
            })
            .await;
        }

        Ok(booking)
    }

    async fn update_needs(
        &self,
        actor: Actor,
        booking_id: Uuid,
        state: EquipmentState,
        note: Option<String>,
    ) -> AppResult<Booking> {
        let existing = self.get_booking(booking_id).await?;
        if !existing.status.blocks_calendar() {
            return Err(AppError::validation(
                "Equipment status can only be set on pending or approved bookings",
            ));
        }

        let status = EquipmentStatus {
            status: state,
            note: note.clone(),
            updated_at: Utc::now(),
        };
        let booking = self
            .uow
            .bookings()
            .set_equipment_status(booking_id, status.clone())
            .await?;

        // Earlier equipment notices are superseded by this one.
        if let Err(e) = self
            .uow
            .alerts()
            .retire_equipment_for_user(booking.user_id)
            .await
        {
            tracing::warn!(error = %e, "Failed to retire stale equipment alerts");
        }

        let message = match state {
            EquipmentState::Prepared => "Your requested equipment has been prepared.".to_string(),
            EquipmentState::NotAvailable => format!(
                "Some requested equipment is not available{}",
                note.as_deref()
                    .map(|n| format!(": {}", n))
                    .unwrap_or_else(|| ".".to_string())
            ),
        };
        self.notify(NewAlert {
            alert_type: "equipment".to_string(),
            severity: AlertSeverity::Info,
            title: "Equipment update".to_string(),
            message,
            metadata: Some(AlertMetadata::Equipment {
                booking_id,
                status,
            }),
            user_id: Some(booking.user_id),
        })
        .await;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "booking.needs".to_string(),
            details: Some(format!(
                "Set equipment status {:?} on booking {}",
                state, booking_id
            )),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        Ok(booking)
    }

    async fn expire_overdue(&self) -> AppResult<u64> {
        let expired = self.uow.bookings().expire_overdue(Utc::now()).await?;

        for booking in &expired {
            self.notify(NewAlert {
                alert_type: "booking".to_string(),
                severity: AlertSeverity::Info,
                title: "Booking expired".to_string(),
                message: format!(
                    "Your booking on {} has ended and was marked expired.",
                    booking.start_time.format("%Y-%m-%d")
                ),
                metadata: None,
                user_id: Some(booking.user_id),
            })
            .await;
        }

        Ok(expired.len() as u64)
    }
}
