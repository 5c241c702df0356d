//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, booking_handler, cron_handler, facility_handler, faq_handler,
    notification_handler, session_handler,
};
use crate::domain::{
    ActivityLogResponse, AlertMetadata, AlertResponse, AlertSeverity, BanDuration,
    BookingResponse, BookingStatus, EquipmentState, EquipmentStatus, FacilityResponse,
    FaqResponse, UserResponse, UserRole, UserStatus,
};

/// OpenAPI documentation for the ORBIT facility booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ORBIT",
        version = "0.1.0",
        description = "University facility booking and administration API",
        contact(name = "API Support", email = "orbit-support@university.edu")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Session
        session_handler::sync_session,
        // Facilities
        facility_handler::list_facilities,
        facility_handler::get_facility,
        facility_handler::create_facility,
        facility_handler::update_facility,
        // Bookings
        booking_handler::create_booking,
        booking_handler::list_bookings,
        booking_handler::list_pending,
        booking_handler::cancel_booking,
        // Admin
        admin_handler::approve_booking,
        admin_handler::deny_booking,
        admin_handler::update_needs,
        admin_handler::list_users,
        admin_handler::ban_user,
        admin_handler::unban_user,
        admin_handler::list_activity,
        admin_handler::list_alerts,
        admin_handler::create_alert,
        // Notifications
        notification_handler::list_notifications,
        notification_handler::mark_read,
        // FAQs
        faq_handler::list_faqs,
        faq_handler::create_faq,
        faq_handler::update_faq,
        faq_handler::delete_faq,
        // Cron
        cron_handler::expire_bookings,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserStatus,
            BanDuration,
            UserResponse,
            FacilityResponse,
            BookingStatus,
            EquipmentState,
            EquipmentStatus,
            BookingResponse,
            AlertSeverity,
            AlertMetadata,
            AlertResponse,
            ActivityLogResponse,
            FaqResponse,
            // Request types
            facility_handler::CreateFacilityRequest,
            facility_handler::UpdateFacilityRequest,
            booking_handler::CreateBookingRequest,
            admin_handler::ApproveBookingRequest,
            admin_handler::DenyBookingRequest,
            admin_handler::UpdateNeedsRequest,
            admin_handler::BanUserRequest,
            admin_handler::CreateAlertRequest,
            notification_handler::MarkReadRequest,
            faq_handler::CreateFaqRequest,
            faq_handler::UpdateFaqRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Session", description = "Login session sync"),
        (name = "Facilities", description = "Bookable facilities"),
        (name = "Bookings", description = "Booking requests and lifecycle"),
        (name = "Admin", description = "Administrative operations"),
        (name = "Notifications", description = "User and global alerts"),
        (name = "FAQs", description = "Frequently asked questions"),
        (name = "Cron", description = "Scheduled maintenance triggers")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Bearer JWT issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
