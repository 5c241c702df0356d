//! User service - profile sync, admin moderation and the audit trail.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::Principal;
use super::Actor;
use crate::domain::{
    ActivityLog, AlertSeverity, BanDuration, NewActivityLog, NewAlert, User,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Look up a user record without failing on absence (status gate).
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Get a user record, 404 when absent.
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Upsert-on-login: create or refresh the record for a principal.
    async fn sync_profile(&self, principal: Principal) -> AppResult<User>;

    /// List user records (admin).
    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Ban a user for the given duration; permanent bans have no end date.
    async fn ban_user(
        &self,
        actor: Actor,
        user_id: Uuid,
        reason: String,
        duration: BanDuration,
        custom_date: Option<chrono::DateTime<Utc>>,
    ) -> AppResult<User>;

    /// Restore a banned or suspended user to active, clearing ban fields.
    async fn unban_user(&self, actor: Actor, user_id: Uuid) -> AppResult<User>;

    /// List the audit trail (admin).
    async fn list_activity(&self, params: PaginationParams)
        -> AppResult<(Vec<ActivityLog>, u64)>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Best-effort audit write: failures are logged, never propagated.
    async fn record_activity(&self, entry: NewActivityLog) {
        if let Err(e) = self.uow.activity().insert(entry).await {
            tracing::warn!(error = %e, "Failed to write activity log entry");
        }
    }

    /// Best-effort alert write: a lost alert does not fail the operation.
    async fn notify(&self, alert: NewAlert) {
        if let Err(e) = self.uow.alerts().insert(alert).await {
            tracing::warn!(error = %e, "Failed to write user alert");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn sync_profile(&self, principal: Principal) -> AppResult<User> {
        self.uow.users().upsert(principal.id, principal.email).await
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.uow.users().list_paginated(params).await
    }

    async fn ban_user(
        &self,
        actor: Actor,
        user_id: Uuid,
        reason: String,
        duration: BanDuration,
        custom_date: Option<chrono::DateTime<Utc>>,
    ) -> AppResult<User> {
        if reason.trim().is_empty() {
            return Err(AppError::validation("A ban reason is required"));
        }

        let now = Utc::now();
        let end_date = duration.end_date(now, custom_date)?;
        let user = self
            .uow
            .users()
            .apply_ban(user_id, reason.clone(), end_date)
            .await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "user.ban".to_string(),
            details: Some(format!(
                "Banned user {} ({:?} until {:?}): {}",
                user_id, duration, end_date, reason
            )),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        let until = match end_date {
            Some(end) => format!("until {}", end.format("%Y-%m-%d %H:%M UTC")),
            None => "permanently".to_string(),
        };
        self.notify(NewAlert {
            alert_type: "account".to_string(),
            severity: AlertSeverity::Warning,
            title: "Account banned".to_string(),
            message: format!("Your account has been banned {}: {}", until, reason),
            metadata: None,
            user_id: Some(user_id),
        })
        .await;

        Ok(user)
    }

    async fn unban_user(&self, actor: Actor, user_id: Uuid) -> AppResult<User> {
        let user = self.uow.users().lift_ban(user_id).await?;

        self.record_activity(NewActivityLog {
            user_id: actor.id,
            action: "user.unban".to_string(),
            details: Some(format!("Unbanned user {}", user_id)),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        })
        .await;

        self.notify(NewAlert {
            alert_type: "account".to_string(),
            severity: AlertSeverity::Info,
            title: "Account restored".to_string(),
            message: "Your account is active again.".to_string(),
            metadata: None,
            user_id: Some(user_id),
        })
        .await;

        Ok(user)
    }

    async fn list_activity(
        &self,
        params: PaginationParams,
    ) -> AppResult<(Vec<ActivityLog>, u64)> {
        self.uow.activity().list_paginated(params).await
    }
}
