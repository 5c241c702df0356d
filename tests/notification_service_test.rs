//! Notification service unit tests: visibility and read-state rules.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use orbit::domain::{
    AlertMetadata, AlertSeverity, EquipmentState, EquipmentStatus, SystemAlert,
};
use orbit::errors::AppError;
use orbit::infra::{
    ActivityLogRepository, AlertRepository, BookingRepository, FacilityRepository, FaqRepository,
    MockActivityLogRepository, MockAlertRepository, UnitOfWork, UserRepository,
};
use orbit::services::{Actor, GlobalAlertRequest, NotificationManager, NotificationService};

struct TestUow {
    alerts: Arc<MockAlertRepository>,
    activity: Arc<MockActivityLogRepository>,
}

impl TestUow {
    fn new(alerts: MockAlertRepository, activity: MockActivityLogRepository) -> Self {
        Self {
            alerts: Arc::new(alerts),
            activity: Arc::new(activity),
        }
    }
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        unimplemented!("not used by notification tests")
    }
    fn facilities(&self) -> Arc<dyn FacilityRepository> {
        unimplemented!("not used by notification tests")
    }
    fn bookings(&self) -> Arc<dyn BookingRepository> {
        unimplemented!("not used by notification tests")
    }
    fn alerts(&self) -> Arc<dyn AlertRepository> {
        self.alerts.clone()
    }
    fn activity(&self) -> Arc<dyn ActivityLogRepository> {
        self.activity.clone()
    }
    fn faqs(&self) -> Arc<dyn FaqRepository> {
        unimplemented!("not used by notification tests")
    }
}

fn alert(user_id: Option<Uuid>, is_read: bool, metadata: Option<AlertMetadata>) -> SystemAlert {
    let now = Utc::now();
    SystemAlert {
        id: Uuid::new_v4(),
        alert_type: "booking".to_string(),
        severity: AlertSeverity::Info,
        title: "Update".to_string(),
        message: "Something happened".to_string(),
        metadata,
        user_id,
        is_read,
        created_at: now,
        updated_at: now,
    }
}

fn equipment_metadata() -> AlertMetadata {
    AlertMetadata::Equipment {
        booking_id: Uuid::new_v4(),
        status: EquipmentStatus {
            status: EquipmentState::Prepared,
            note: None,
            updated_at: Utc::now(),
        },
    }
}

#[tokio::test]
async fn user_list_hides_read_equipment_alerts() {
    let user_id = Uuid::new_v4();
    let kept = alert(Some(user_id), false, Some(equipment_metadata()));
    let kept_id = kept.id;

    let mut alerts = MockAlertRepository::new();
    let stale = alert(Some(user_id), true, Some(equipment_metadata()));
    let read_plain = alert(Some(user_id), true, None);
    let read_plain_id = read_plain.id;
    alerts
        .expect_list_for_user()
        .with(eq(user_id))
        .returning(move |_| Ok(vec![kept.clone(), stale.clone(), read_plain.clone()]));

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let visible = manager.list_for_user(user_id).await.unwrap();
    let ids: Vec<Uuid> = visible.iter().map(|a| a.id).collect();

    // The unread equipment alert and the read plain alert survive; only the
    // read equipment alert is retired.
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&kept_id));
    assert!(ids.contains(&read_plain_id));
}

#[tokio::test]
async fn global_list_hides_stale_equipment_alerts() {
    let mut alerts = MockAlertRepository::new();
    let global = alert(None, false, None);
    let global_id = global.id;
    let stale = alert(None, true, Some(equipment_metadata()));
    alerts
        .expect_list_global()
        .returning(move || Ok(vec![global.clone(), stale.clone()]));

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let visible = manager.list_global().await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, global_id);
}

#[tokio::test]
async fn marking_another_users_alert_is_not_found() {
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let target = alert(Some(owner), false, None);
    let target_id = target.id;

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_find_by_id()
        .with(eq(target_id))
        .returning(move |_| Ok(Some(target.clone())));

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let result = manager.mark_read(stranger, false, target_id).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn student_cannot_mark_global_alert() {
    let target = alert(None, false, None);
    let target_id = target.id;

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(target.clone())));

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let result = manager.mark_read(Uuid::new_v4(), false, target_id).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn owner_marks_own_alert_read() {
    let owner = Uuid::new_v4();
    let target = alert(Some(owner), false, None);
    let target_id = target.id;

    let mut alerts = MockAlertRepository::new();
    let found = target.clone();
    alerts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    alerts
        .expect_mark_read()
        .with(eq(target_id))
        .times(1)
        .returning(move |_| {
            let mut a = target.clone();
            a.is_read = true;
            Ok(a)
        });

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let updated = manager.mark_read(owner, false, target_id).await.unwrap();
    assert!(updated.is_read);
}

#[tokio::test]
async fn admin_marks_global_alert_read() {
    let target = alert(None, false, None);
    let target_id = target.id;

    let mut alerts = MockAlertRepository::new();
    let found = target.clone();
    alerts
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    alerts.expect_mark_read().times(1).returning(move |_| {
        let mut a = target.clone();
        a.is_read = true;
        Ok(a)
    });

    let manager = NotificationManager::new(Arc::new(TestUow::new(
        alerts,
        MockActivityLogRepository::new(),
    )));

    let updated = manager
        .mark_read(Uuid::new_v4(), true, target_id)
        .await
        .unwrap();
    assert!(updated.is_read);
}

#[tokio::test]
async fn global_alert_is_created_without_owner() {
    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(1)
        .withf(|data| data.user_id.is_none() && data.metadata.is_none())
        .returning(|data| {
            let now = Utc::now();
            Ok(SystemAlert {
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
            })
        });

    let mut activity = MockActivityLogRepository::new();
    activity.expect_insert().times(1).returning(|log| {
        Ok(orbit::domain::ActivityLog {
            id: Uuid::new_v4(),
            user_id: log.user_id,
            action: log.action,
            details: log.details,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            created_at: Utc::now(),
        })
    });

    let manager = NotificationManager::new(Arc::new(TestUow::new(alerts, activity)));

    let created = manager
        .create_global_alert(
            Actor::new(Uuid::new_v4()),
            GlobalAlertRequest {
                alert_type: "maintenance".to_string(),
                severity: AlertSeverity::Warning,
                title: "Pool closed".to_string(),
                message: "The pool is closed this weekend.".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(created.user_id.is_none());
}
