//! User service unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use orbit::domain::{
    ActivityLog, BanDuration, SystemAlert, User, UserRole, UserStatus,
};
use orbit::errors::AppError;
use orbit::infra::{
    ActivityLogRepository, AlertRepository, BookingRepository, FacilityRepository, FaqRepository,
    MockActivityLogRepository, MockAlertRepository, MockUserRepository, UnitOfWork,
    UserRepository,
};
use orbit::services::{Actor, Principal, UserManager, UserService};

struct TestUow {
    users: Arc<MockUserRepository>,
    alerts: Arc<MockAlertRepository>,
    activity: Arc<MockActivityLogRepository>,
}

impl TestUow {
    fn new(
        users: MockUserRepository,
        alerts: MockAlertRepository,
        activity: MockActivityLogRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            alerts: Arc::new(alerts),
            activity: Arc::new(activity),
        }
    }
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }
    fn facilities(&self) -> Arc<dyn FacilityRepository> {
        unimplemented!("not used by user tests")
    }
    fn bookings(&self) -> Arc<dyn BookingRepository> {
        unimplemented!("not used by user tests")
    }
    fn alerts(&self) -> Arc<dyn AlertRepository> {
        self.alerts.clone()
    }
    fn activity(&self) -> Arc<dyn ActivityLogRepository> {
        self.activity.clone()
    }
    fn faqs(&self) -> Arc<dyn FaqRepository> {
        unimplemented!("not used by user tests")
    }
}

fn test_user(id: Uuid) -> User {
    let now = Utc::now();
    User {
        id,
        email: "student@university.edu".to_string(),
        first_name: Some("Sam".to_string()),
        last_name: Some("Ortiz".to_string()),
        role: UserRole::Student,
        status: UserStatus::Active,
        ban_reason: None,
        ban_end_date: None,
        banned_at: None,
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

#[tokio::test]
async fn sync_profile_upserts_record() {
    let id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_upsert()
        .with(eq(id), eq("student@university.edu".to_string()))
        .times(1)
        .returning(|id, _| Ok(test_user(id)));

    let manager = UserManager::new(Arc::new(TestUow::new(
        users,
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let user = manager
        .sync_profile(Principal {
            id,
            email: "student@university.edu".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, id);
}

#[tokio::test]
async fn ban_requires_a_reason() {
    let manager = UserManager::new(Arc::new(TestUow::new(
        MockUserRepository::new(),
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .ban_user(
            Actor::new(Uuid::new_v4()),
            Uuid::new_v4(),
            "   ".to_string(),
            BanDuration::Permanent,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn permanent_ban_has_no_end_date() {
    let target = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_apply_ban()
        .withf(move |id, _, end_date| *id == target && end_date.is_none())
        .times(1)
        .returning(|id, reason, _| {
            let mut u = test_user(id);
            u.status = UserStatus::Banned;
            u.ban_reason = Some(reason);
            u.banned_at = Some(Utc::now());
            Ok(u)
        });

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(1)
        .withf(move |data| data.user_id == Some(target))
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = UserManager::new(Arc::new(TestUow::new(users, alerts, activity)));

    let user = manager
        .ban_user(
            Actor::new(Uuid::new_v4()),
            target,
            "Vandalism".to_string(),
            BanDuration::Permanent,
            None,
        )
        .await
        .unwrap();

    assert_eq!(user.status, UserStatus::Banned);
    assert!(user.ban_end_date.is_none());
}

#[tokio::test]
async fn one_week_ban_ends_in_seven_days() {
    let target = Uuid::new_v4();
    let before = Utc::now();

    let mut users = MockUserRepository::new();
    users
        .expect_apply_ban()
        .withf(move |_, _, end_date| {
            let end = end_date.expect("a timed ban must carry an end date");
            let expected = Utc::now() + Duration::weeks(1);
            (end - expected).num_seconds().abs() < 5
        })
        .times(1)
        .returning(move |id, reason, end_date| {
            let mut u = test_user(id);
            u.status = UserStatus::Banned;
            u.ban_reason = Some(reason);
            u.ban_end_date = end_date;
            u.banned_at = Some(before);
            Ok(u)
        });

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .returning(|log| Ok(logged_activity(log)));

    let manager = UserManager::new(Arc::new(TestUow::new(users, alerts, activity)));

    let user = manager
        .ban_user(
            Actor::new(Uuid::new_v4()),
            target,
            "Repeated no-shows".to_string(),
            BanDuration::OneWeek,
            None,
        )
        .await
        .unwrap();

    assert!(user.ban_end_date.is_some());
}

#[tokio::test]
async fn custom_ban_without_date_is_rejected() {
    let manager = UserManager::new(Arc::new(TestUow::new(
        MockUserRepository::new(),
        MockAlertRepository::new(),
        MockActivityLogRepository::new(),
    )));

    let result = manager
        .ban_user(
            Actor::new(Uuid::new_v4()),
            Uuid::new_v4(),
            "Reason".to_string(),
            BanDuration::Custom,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn unban_restores_active_and_clears_fields() {
    let target = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_lift_ban()
        .with(eq(target))
        .times(1)
        .returning(|id| Ok(test_user(id)));

    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .times(1)
        .returning(|data| Ok(inserted_alert(data)));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .times(1)
        .returning(|log| Ok(logged_activity(log)));

    let manager = UserManager::new(Arc::new(TestUow::new(users, alerts, activity)));

    let user = manager
        .unban_user(Actor::new(Uuid::new_v4()), target)
        .await
        .unwrap();

    assert_eq!(user.status, UserStatus::Active);
    assert!(user.ban_reason.is_none());
    assert!(user.ban_end_date.is_none());
    assert!(user.banned_at.is_none());
}

#[tokio::test]
async fn ban_succeeds_even_when_side_effects_fail() {
    let target = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_apply_ban().returning(|id, reason, _| {
        let mut u = test_user(id);
        u.status = UserStatus::Banned;
        u.ban_reason = Some(reason);
        Ok(u)
    });

    // Both side-effect writes fail; the ban itself must still succeed.
    let mut alerts = MockAlertRepository::new();
    alerts
        .expect_insert()
        .returning(|_| Err(AppError::internal("alerts table unavailable")));

    let mut activity = MockActivityLogRepository::new();
    activity
        .expect_insert()
        .returning(|_| Err(AppError::internal("activity table unavailable")));

    let manager = UserManager::new(Arc::new(TestUow::new(users, alerts, activity)));

    let user = manager
        .ban_user(
            Actor::new(Uuid::new_v4()),
            target,
            "Vandalism".to_string(),
            BanDuration::Permanent,
            None,
        )
        .await
        .unwrap();

    assert_eq!(user.status, UserStatus::Banned);
}
