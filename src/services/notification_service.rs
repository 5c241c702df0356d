//! Notification service - alert visibility and read state.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::Actor;
use crate::domain::{AlertSeverity, NewActivityLog, NewAlert, SystemAlert};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Request payload for a new admin/global alert.
#[derive(Debug, Clone)]
pub struct GlobalAlertRequest {
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
}

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Admin/global alerts, with stale equipment notices hidden.
    async fn list_global(&self) -> AppResult<Vec<SystemAlert>>;

    /// One user's alerts, with stale equipment notices hidden.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<SystemAlert>>;

    /// Mark one alert read. The alert must be visible to the caller:
    /// their own, or a global alert when the caller is an admin.
    async fn mark_read(
        &self,
        viewer_id: Uuid,
        viewer_is_admin: bool,
        alert_id: Uuid,
    ) -> AppResult<SystemAlert>;

    /// Create an admin/global alert.
    async fn create_global_alert(
        &self,
        actor: Actor,
        request: GlobalAlertRequest,
    ) -> AppResult<SystemAlert>;
}

/// Concrete implementation of NotificationService using Unit of Work.
pub struct NotificationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn hide_stale(alerts: Vec<SystemAlert>) -> Vec<SystemAlert> {
        alerts
            .into_iter()
            .filter(|a| !a.is_stale_equipment())
            .collect()
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationManager<U> {
    async fn list_global(&self) -> AppResult<Vec<SystemAlert>> {
        Ok(Self::hide_stale(self.uow.alerts().list_global().await?))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<SystemAlert>> {
        Ok(Self::hide_stale(
            self.uow.alerts().list_for_user(user_id).await?,
        ))
    }

    async fn mark_read(
        &self,
        viewer_id: Uuid,
        viewer_is_admin: bool,
        alert_id: Uuid,
    ) -> AppResult<SystemAlert> {
        let alert = self
            .uow
            .alerts()
            .find_by_id(alert_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // No cross-user visibility in either direction
        let visible = match alert.user_id {
            Some(owner) => owner == viewer_id,
            None => viewer_is_admin,
        };
        if !visible {
            return Err(AppError::NotFound);
        }

        self.uow.alerts().mark_read(alert_id).await
    }

    async fn create_global_alert(
        &self,
        actor: Actor,
        request: GlobalAlertRequest,
    ) -> AppResult<SystemAlert> {
        let alert = self
            .uow
            .alerts()
            .insert(NewAlert {
                alert_type: request.alert_type,
                severity: request.severity,
                title: request.title,
                message: request.message,
                metadata: None,
                user_id: None,
            })
            .await?;

        if let Err(e) = self
            .uow
            .activity()
            .insert(NewActivityLog {
                user_id: actor.id,
                action: "alert.create".to_string(),
                details: Some(format!("Created global alert {}", alert.id)),
                ip_address: actor.ip_address,
                user_agent: actor.user_agent,
            })
            .await
        {
            tracing::warn!(error = %e, "Failed to write activity log entry");
        }

        Ok(alert)
    }
}
