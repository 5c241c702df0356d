//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{
    AuthVerifier, BookingService, FacilityService, FaqService, NotificationService,
    ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Bearer token verifier
    pub auth_verifier: Arc<dyn AuthVerifier>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Booking service
    pub booking_service: Arc<dyn BookingService>,
    /// Facility service
    pub facility_service: Arc<dyn FacilityService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// FAQ service
    pub faq_service: Arc<dyn FaqService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), &config);

        Self {
            auth_verifier: container.auth(),
            user_service: container.users(),
            booking_service: container.bookings(),
            facility_service: container.facilities(),
            notification_service: container.notifications(),
            faq_service: container.faqs(),
            cache,
            database,
            config: Arc::new(config),
        }
    }
}
