//! FAQ service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::Actor;
use crate::domain::{Faq, FaqChanges, NewActivityLog, NewFaq};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// FAQ service trait for dependency injection.
#[async_trait]
pub trait FaqService: Send + Sync {
    async fn list_faqs(&self) -> AppResult<Vec<Faq>>;

    async fn create_faq(&self, actor: Actor, data: NewFaq) -> AppResult<Faq>;

    async fn update_faq(&self, actor: Actor, id: Uuid, changes: FaqChanges) -> AppResult<Faq>;

    async fn delete_faq(&self, actor: Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of FaqService using Unit of Work.
pub struct FaqManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FaqManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn record_activity(&self, actor: Actor, action: &str, details: String) {
        let entry = NewActivityLog {
            user_id: actor.id,
            action: action.to_string(),
            details: Some(details),
            ip_address: actor.ip_address,
            user_agent: actor.user_agent,
        };
        if let Err(e) = self.uow.activity().insert(entry).await {
            tracing::warn!(error = %e, "Failed to write activity log entry");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> FaqService for FaqManager<U> {
    async fn list_faqs(&self) -> AppResult<Vec<Faq>> {
        self.uow.faqs().list().await
    }

    async fn create_faq(&self, actor: Actor, data: NewFaq) -> AppResult<Faq> {
        let faq = self.uow.faqs().insert(data).await?;
        self.record_activity(actor, "faq.create", format!("Created FAQ {}", faq.id))
            .await;
        Ok(faq)
    }

    async fn update_faq(&self, actor: Actor, id: Uuid, changes: FaqChanges) -> AppResult<Faq> {
        let faq = self.uow.faqs().update(id, changes).await?;
        self.record_activity(actor, "faq.update", format!("Updated FAQ {}", id))
            .await;
        Ok(faq)
    }

    async fn delete_faq(&self, actor: Actor, id: Uuid) -> AppResult<()> {
        self.uow.faqs().delete(id).await?;
        self.record_activity(actor, "faq.delete", format!("Deleted FAQ {}", id))
            .await;
        Ok(())
    }
}
