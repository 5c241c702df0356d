//! Unit of Work - centralized repository access.
//!
//! Provides one injection point for all repositories so services depend on
//! a single abstraction. Transactional booking operations (create, approve)
//! manage their own serializable transactions inside the booking store.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    ActivityLogRepository, ActivityLogStore, AlertRepository, AlertStore, BookingRepository,
    BookingStore, FacilityRepository, FacilityStore, FaqRepository, FaqStore, UserRepository,
    UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn facilities(&self) -> Arc<dyn FacilityRepository>;
    fn bookings(&self) -> Arc<dyn BookingRepository>;
    fn alerts(&self) -> Arc<dyn AlertRepository>;
    fn activity(&self) -> Arc<dyn ActivityLogRepository>;
    fn faqs(&self) -> Arc<dyn FaqRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    users: Arc<UserStore>,
    facilities: Arc<FacilityStore>,
    bookings: Arc<BookingStore>,
    alerts: Arc<AlertStore>,
    activity: Arc<ActivityLogStore>,
    faqs: Arc<FaqStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over one shared connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            facilities: Arc::new(FacilityStore::new(db.clone())),
            bookings: Arc::new(BookingStore::new(db.clone())),
            alerts: Arc::new(AlertStore::new(db.clone())),
            activity: Arc::new(ActivityLogStore::new(db.clone())),
            faqs: Arc::new(FaqStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn facilities(&self) -> Arc<dyn FacilityRepository> {
        self.facilities.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn alerts(&self) -> Arc<dyn AlertRepository> {
        self.alerts.clone()
    }

    fn activity(&self) -> Arc<dyn ActivityLogRepository> {
        self.activity.clone()
    }

    fn faqs(&self) -> Arc<dyn FaqRepository> {
        self.faqs.clone()
    }
}
