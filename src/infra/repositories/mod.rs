//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod activity_repository;
mod alert_repository;
mod booking_repository;
pub(crate) mod entities;
mod facility_repository;
mod faq_repository;
mod user_repository;

pub use activity_repository::{ActivityLogRepository, ActivityLogStore};
pub use alert_repository::{AlertRepository, AlertStore};
pub use booking_repository::{BookingRepository, BookingStore};
pub use facility_repository::{FacilityRepository, FacilityStore};
pub use faq_repository::{FaqRepository, FaqStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use activity_repository::MockActivityLogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use alert_repository::MockAlertRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use facility_repository::MockFacilityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use faq_repository::MockFaqRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
