//! FAQ domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A frequently-asked question shown on the public help page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a new FAQ entry.
#[derive(Debug, Clone)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

/// Partial update applied to an existing FAQ entry.
#[derive(Debug, Clone, Default)]
pub struct FaqChanges {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// FAQ response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            category: f.category,
            updated_at: f.updated_at,
        }
    }
}
