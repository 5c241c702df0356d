//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod activity;
pub mod alert;
pub mod booking;
pub mod facility;
pub mod faq;
pub mod user;

pub use activity::{ActivityLog, ActivityLogResponse, NewActivityLog};
pub use alert::{AlertMetadata, AlertResponse, AlertSeverity, NewAlert, SystemAlert};
pub use booking::{
    intervals_overlap, Booking, BookingResponse, BookingStatus, EquipmentState, EquipmentStatus,
    NewBooking,
};
pub use facility::{Facility, FacilityChanges, FacilityResponse, NewFacility};
pub use faq::{Faq, FaqChanges, FaqResponse, NewFaq};
pub use user::{BanDuration, User, UserResponse, UserRole, UserStatus};
