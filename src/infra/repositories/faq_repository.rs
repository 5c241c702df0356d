//! FAQ repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::faq::{self, Entity as FaqEntity};
use crate::domain::{Faq, FaqChanges, NewFaq};
use crate::errors::{AppError, AppResult};

/// FAQ repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FaqRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Faq>>;

    async fn insert(&self, data: NewFaq) -> AppResult<Faq>;

    async fn update(&self, id: Uuid, changes: FaqChanges) -> AppResult<Faq>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete SeaORM-backed implementation of FaqRepository.
pub struct FaqStore {
    db: DatabaseConnection,
}

impl FaqStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FaqRepository for FaqStore {
    async fn list(&self) -> AppResult<Vec<Faq>> {
        let models = FaqEntity::find()
            .order_by_asc(faq::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Faq::from).collect())
    }

    async fn insert(&self, data: NewFaq) -> AppResult<Faq> {
        let now = Utc::now();
        let active = faq::ActiveModel {
            id: Set(Uuid::new_v4()),
            question: Set(data.question),
            answer: Set(data.answer),
            category: Set(data.category),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(Faq::from(active.insert(&self.db).await?))
    }

    async fn update(&self, id: Uuid, changes: FaqChanges) -> AppResult<Faq> {
        let existing = FaqEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: faq::ActiveModel = existing.into();
        if let Some(question) = changes.question {
            active.question = Set(question);
        }
        if let Some(answer) = changes.answer {
            active.answer = Set(answer);
        }
        if let Some(category) = changes.category {
            active.category = Set(Some(category));
        }
        active.updated_at = Set(Utc::now());
        Ok(Faq::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existing = FaqEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        existing.delete(&self.db).await?;
        Ok(())
    }
}
