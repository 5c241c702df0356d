//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access.

mod auth;
mod booking_service;
pub mod container;
mod facility_service;
mod faq_service;
mod notification_service;
mod user_service;

use uuid::Uuid;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth::{AuthVerifier, Claims, JwtVerifier, Principal};
pub use booking_service::{BookingManager, BookingRequest, BookingService};
pub use facility_service::{FacilityManager, FacilityService};
pub use faq_service::{FaqManager, FaqService};
pub use notification_service::{GlobalAlertRequest, NotificationManager, NotificationService};
pub use user_service::{UserManager, UserService};

/// The authenticated user performing an operation, with the request
/// provenance recorded into the audit trail.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl Actor {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ip_address: None,
            user_agent: None,
        }
    }
}
