//! User repository - persistence for application user records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user::{self, Entity as UserEntity};
use crate::config::{ROLE_STUDENT, STATUS_ACTIVE, STATUS_BANNED};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user record by principal id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert the record for a newly seen principal, or refresh the email
    /// of an existing one (upsert-on-login).
    async fn upsert(&self, id: Uuid, email: String) -> AppResult<User>;

    /// List user records, newest first.
    async fn list_paginated(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Mark a user banned with the given reason and optional end date.
    async fn apply_ban(
        &self,
        id: Uuid,
        reason: String,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<User>;

    /// Restore a user to active and clear all ban fields.
    async fn lift_ban(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete SeaORM-backed implementation of UserRepository.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn get(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn upsert(&self, id: Uuid, email: String) -> AppResult<User> {
        let now = Utc::now();

        match UserEntity::find_by_id(id).one(&self.db).await? {
            Some(existing) => {
                if existing.email == email {
                    return Ok(User::from(existing));
                }
                let mut active: user::ActiveModel = existing.into();
                active.email = Set(email);
                active.updated_at = Set(now);
                Ok(User::from(active.update(&self.db).await?))
            }
            None => {
                let active = user::ActiveModel {
                    id: Set(id),
                    email: Set(email),
                    first_name: Set(None),
                    last_name: Set(None),
                    role: Set(ROLE_STUDENT.to_string()),
                    status: Set(STATUS_ACTIVE.to_string()),
                    ban_reason: Set(None),
                    ban_end_date: Set(None),
                    banned_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                Ok(User::from(active.insert(&self.db).await?))
            }
        }
    }

    async fn list_paginated(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn apply_ban(
        &self,
        id: Uuid,
        reason: String,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<User> {
        let now = Utc::now();
        let mut active: user::ActiveModel = self.get(id).await?.into();
        active.status = Set(STATUS_BANNED.to_string());
        active.ban_reason = Set(Some(reason));
        active.ban_end_date = Set(end_date);
        active.banned_at = Set(Some(now));
        active.updated_at = Set(now);
        Ok(User::from(active.update(&self.db).await?))
    }

    async fn lift_ban(&self, id: Uuid) -> AppResult<User> {
        let mut active: user::ActiveModel = self.get(id).await?.into();
        active.status = Set(STATUS_ACTIVE.to_string());
        active.ban_reason = Set(None);
        active.ban_end_date = Set(None);
        active.banned_at = Set(None);
        active.updated_at = Set(Utc::now());
        Ok(User::from(active.update(&self.db).await?))
    }
}
