//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod activity_log;
pub mod booking;
pub mod facility;
pub mod faq;
pub mod system_alert;
pub mod user;
