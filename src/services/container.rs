//! Service container - centralized service access.
//!
//! Provides one place to construct the service graph and hand out
//! trait objects to the API layer.

use std::sync::Arc;

use super::{
    AuthVerifier, BookingService, FacilityService, FaqService, NotificationService, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get token verifier
    fn auth(&self) -> Arc<dyn AuthVerifier>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get booking service
    fn bookings(&self) -> Arc<dyn BookingService>;

    /// Get facility service
    fn facilities(&self) -> Arc<dyn FacilityService>;

    /// Get notification service
    fn notifications(&self) -> Arc<dyn NotificationService>;

    /// Get FAQ service
    fn faqs(&self) -> Arc<dyn FaqService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_verifier: Arc<dyn AuthVerifier>,
    user_service: Arc<dyn UserService>,
    booking_service: Arc<dyn BookingService>,
    facility_service: Arc<dyn FacilityService>,
    notification_service: Arc<dyn NotificationService>,
    faq_service: Arc<dyn FaqService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{
            BookingManager, FacilityManager, FaqManager, JwtVerifier, NotificationManager,
            UserManager,
        };

        let uow = Arc::new(Persistence::new(db));
        Self {
            auth_verifier: Arc::new(JwtVerifier::new(config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            booking_service: Arc::new(BookingManager::new(uow.clone())),
            facility_service: Arc::new(FacilityManager::new(uow.clone())),
            notification_service: Arc::new(NotificationManager::new(uow.clone())),
            faq_service: Arc::new(FaqManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthVerifier> {
        self.auth_verifier.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn facilities(&self) -> Arc<dyn FacilityService> {
        self.facility_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn faqs(&self) -> Arc<dyn FaqService> {
        self.faq_service.clone()
    }
}
