//! HTTP request handlers.

pub mod admin_handler;
pub mod booking_handler;
pub mod cron_handler;
pub mod facility_handler;
pub mod faq_handler;
pub mod notification_handler;
pub mod session_handler;

pub use admin_handler::admin_routes;
pub use booking_handler::booking_routes;
pub use cron_handler::cron_routes;
pub use facility_handler::facility_routes;
pub use faq_handler::faq_routes;
pub use notification_handler::notification_routes;
pub use session_handler::session_routes;
