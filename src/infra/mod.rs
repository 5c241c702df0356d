//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching systems (Redis)
//! - Unit of Work for repository access

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    ActivityLogRepository, AlertRepository, BookingRepository, FacilityRepository, FaqRepository,
    UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockActivityLogRepository, MockAlertRepository, MockBookingRepository, MockFacilityRepository,
    MockFaqRepository, MockUserRepository,
};
