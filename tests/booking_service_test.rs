//! Booking service unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use orbit::domain::{
    ActivityLog, AlertMetadata, Booking, BookingStatus, EquipmentState, SystemAlert,
};
use orbit::errors::AppError;
use orbit::infra::{
    ActivityLogRepository, AlertRepository, BookingRepository, FacilityRepository, FaqRepository,
    MockActivityLogRepository, MockAlertRepository, MockBookingRepository, UnitOfWork,
    UserRepository,
};
use orbit::services::{Actor, BookingManager, BookingRequest, BookingService};

struct TestUow {
    bookings: Arc<MockBookingRepository>,
    alerts: Arc<MockAlertRepository>,
    activity: Arc<MockActivityLogRepository>,
}

impl TestUow {
    fn new(
        bookings: MockBookingRepository,
        alerts: MockAlertRepository,
        activity: MockActivityLogRepository,
    ) -> Self {
        Self {
            bookings: Arc::new(bookings),
            alerts: Arc::new(alerts),
            activity: Arc::new(activity),
        }
    }
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        unimplemented!("not used by booking tests")
    }
    fn facilities(&self) -> Arc<dyn FacilityRepository> {
        unimplemented!("not used by booking tests")
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
        unimplemented!("not used by booking tests")
    }
}

fn test_booking(id: Uuid, user_id: Uuid, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        id,
        user_id,
        facility_id: Uuid::new_v4(),
        start_time: now + Duration::days(1),
        end_time: now + Duration::days(1) + Duration::hours(1),
        purpose: "Study group".to_string(),
        status,
        equipment: None,
        admin_response: None,
        equipment_status: None,
        arrival_confirmed: false,
        created_at: now,
        updated_at: now,
    }
}

fn logged_activity(log: orbit::domain::NewActivityLog) -> ActivityLog {
    ActivityLog {
        id: Uuid::new_v4(),
        user_id: log.user_id,
        action: log.action,
        details: log.details,
        ip_address: log.ip_address,
        user_agent: log.user_agent,
        created_at: Utc::now(),
    }
}

fn inserted_alert(data: orbit::domain::NewAlert) -> SystemAlert {
    let now = Utc::now();
    SystemAlert {
        id: Uuid::new_v4(),
        alert_type: data.alert_type,
        severity: data.severity,
        title: data.title,
        message: data.message,
        metadata: data.metadata,
        user_id: data.user_id,
        is_read: false,
        created_at: now,
        updated_at: now,
    }
}

fn request(start_offset: Duration, end_offset: Duration) -> BookingRequest {
    let now = Utc::now();
    BookingRequest {
        facility_id: Uuid::new_v4(),
        start_time: now + start_offset,
        end_time: now + end_offset,
        purpose: "Robotics club".to_string(),
        equipment: None,
    }
}

#[tokio::test]
async fn create_rejects_inverted_time_range() {
    let manager = BookingManager::new(Arc::new(TestUow::new(
        MockBookingRepository::new(),
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .create_booking(
            Actor::new(Uuid::new_v4()),
            request(Duration::hours(2), Duration::hours(1)),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_rejects_past_start() {
    let manager = BookingManager::new(Arc::new(TestUow::new(
        MockBookingRepository::new(),
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .create_booking(
            Actor::new(Uuid::new_v4()),
            request(-Duration::hours(1), Duration::hours(1)),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_surfaces_repository_conflict() {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_create()
        .returning(|_| Err(AppError::conflict("Time range conflicts with an existing booking")));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .create_booking(
            Actor::new(Uuid::new_v4()),
            request(Duration::minutes(30), Duration::minutes(90)),
        )
        .await;

    match result {
        Err(e @ AppError::Conflict(_)) => {
            assert_eq!(e.status(), axum::http::StatusCode::CONFLICT)
        }
        other => panic!("expected conflict, got {:?}", other.map(|b| b.id)),
    }
}

#[tokio::test]
async fn create_succeeds_and_records_activity() {
    let user_id = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().returning(move |data| {
        let mut b = test_booking(Uuid::new_v4(), data.user_id, BookingStatus::Pending);
        b.facility_id = data.facility_id;
        b.start_time = data.start_time;
        b.end_time = data.end_time;
        Ok(b)
    });

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        activity,
    )));

    let booking = manager
        .create_booking(
            Actor::new(user_id),
            request(Duration::hours(1), Duration::hours(2)),
        )
        .await
        .unwrap();

    assert_eq!(booking.user_id, user_id);
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn deny_rejects_non_pending_booking() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .with(eq(booking_id))
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Approved))));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .deny_booking(
            Actor::new(Uuid::new_v4()),
            booking_id,
            "Hall unavailable".to_string(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn approve_notifies_owner() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_approve()
        .with(eq(booking_id), eq(None::<String>))
        .returning(move |id, _| Ok(test_booking(id, owner, BookingStatus::Approved)));

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(1)
        .withf(move |data| data.user_id == Some(owner))
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = BookingManager::new(Arc::new(TestUow::new(bookings, alerts, activity)));

    let booking = manager
        .approve_booking(Actor::new(Uuid::new_v4()), booking_id, None)
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Approved);
}

#[tokio::test]
async fn cancel_by_stranger_is_forbidden() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Pending))));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .cancel_booking(Actor::new(Uuid::new_v4()), false, booking_id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn owner_cancel_does_not_notify() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Pending))));
    bookings
        .expect_set_status()
        .with(
            eq(booking_id),
            eq(BookingStatus::Cancelled),
            eq(None::<String>),
        )
        .returning(move |id, _, _| Ok(test_booking(id, owner, BookingStatus::Cancelled)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    // No alert expectations: an owner cancelling their own booking must not
    // generate a notification.
    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        activity,
    )));

    let booking = manager
        .cancel_booking(Actor::new(owner), false, booking_id)
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn admin_cancel_notifies_owner() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let admin = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Approved))));
    bookings
        .expect_set_status()
        .returning(move |id, _, _| Ok(test_booking(id, owner, BookingStatus::Cancelled)));

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(1)
        .withf(move |data| data.user_id == Some(owner))
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = BookingManager::new(Arc::new(TestUow::new(bookings, alerts, activity)));

    manager
        .cancel_booking(Actor::new(admin), true, booking_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn needs_update_retires_old_alerts_and_raises_one() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Approved))));
    bookings
        .expect_set_equipment_status()
        .times(1)
        .returning(move |id, status| {
            let mut b = test_booking(id, owner, BookingStatus::Approved);
            b.equipment_status = Some(status);
            Ok(b)
        });

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_retire_equipment_for_user()
        .with(eq(owner))
        .times(1)
        .returning(|_| Ok(2));
    alerts
        .expect_insert()
        .times(1)
        .withf(move |data| {
            data.user_id == Some(owner)
                && matches!(data.metadata, Some(AlertMetadata::Equipment { .. }))
        })
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = BookingManager::new(Arc::new(TestUow::new(bookings, alerts, activity)));

    let booking = manager
        .update_needs(
            Actor::new(Uuid::new_v4()),
            booking_id,
            EquipmentState::Prepared,
            None,
        )
        .await
        .unwrap();

    assert!(booking.equipment_status.is_some());
}

#[tokio::test]
async fn needs_update_rejects_terminal_booking() {
    let booking_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_booking(id, owner, BookingStatus::Denied))));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .update_needs(
            Actor::new(Uuid::new_v4()),
            booking_id,
            EquipmentState::NotAvailable,
            Some("Projector broken".to_string()),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn expire_sweep_counts_and_notifies() {
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    let mut bookings = MockBookingRepository::new();
    bookings.expect_expire_overdue().returning(move |_| {
        Ok(vec![
            test_booking(Uuid::new_v4(), owner_a, BookingStatus::Expired),
            test_booking(Uuid::new_v4(), owner_b, BookingStatus::Expired),
        ])
    });

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(2)
        .returning(|data| Ok(inserted_alert(data)));

    let manager = BookingManager::new(Arc::new(TestUow::new(
        bookings,
        alerts,
        MockActivityLogRepository::new(),
    )));

    assert_eq!(manager.expire_overdue().await.unwrap(), 2);
}
