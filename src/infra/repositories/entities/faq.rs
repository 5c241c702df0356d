//! SeaORM entity for the faqs table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::Faq;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faqs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Faq {
    fn from(m: Model) -> Self {
        Faq {
            id: m.id,
            question: m.question,
            answer: m.answer,
            category: m.category,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
