//! Authorization gate tests.
//!
//! These exercise the gate decision directly with hand-written mock
//! services, without HTTP, database, or Redis.

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use uuid::Uuid;

use orbit::api::middleware::{authorize, require_admin};
use orbit::domain::{ActivityLog, BanDuration, User, UserRole, UserStatus};
use orbit::errors::{AppError, AppResult};
use orbit::services::{Actor, AuthVerifier, Principal, UserService};
use orbit::types::PaginationParams;

const VALID_TOKEN: &str = "valid-test-token";

/// Verifier that accepts one fixed token.
struct StubVerifier {
    principal_id: Uuid,
}

impl AuthVerifier for StubVerifier {
    fn verify(&self, token: &str) -> AppResult<Principal> {
        if token == VALID_TOKEN {
            Ok(Principal {
                id: self.principal_id,
                email: "student@university.edu".to_string(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// What the stub user service reports for the status lookup.
enum Lookup {
    Found(Box<User>),
    Missing,
    Error,
}

struct StubUserService {
    lookup: Lookup,
}

#[async_trait]
impl UserService for StubUserService {
    async fn find_user(&self, _id: Uuid) -> AppResult<Option<User>> {
        match &self.lookup {
            Lookup::Found(user) => Ok(Some(*user.clone())),
            Lookup::Missing => Ok(None),
            Lookup::Error => Err(AppError::internal("status lookup failed")),
        }
    }

    async fn get_user(&self, _id: Uuid) -> AppResult<User> {
        unimplemented!("not used by gate tests")
    }

    async fn sync_profile(&self, _principal: Principal) -> AppResult<User> {
        unimplemented!("not used by gate tests")
    }

    async fn list_users(&self, _params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        unimplemented!("not used by gate tests")
    }

    async fn ban_user(
        &self,
        _actor: Actor,
        _user_id: Uuid,
        _reason: String,
        _duration: BanDuration,
        _custom_date: Option<chrono::DateTime<Utc>>,
    ) -> AppResult<User> {
        unimplemented!("not used by gate tests")
    }

    async fn unban_user(&self, _actor: Actor, _user_id: Uuid) -> AppResult<User> {
        unimplemented!("not used by gate tests")
    }

    async fn list_activity(
        &self,
        _params: PaginationParams,
    ) -> AppResult<(Vec<ActivityLog>, u64)> {
        unimplemented!("not used by gate tests")
    }
}

fn user(id: Uuid, role: UserRole, status: UserStatus) -> User {
    let now = Utc::now();
    User {
        id,
        email: "student@university.edu".to_string(),
        first_name: None,
        last_name: None,
        role,
        status,
        ban_reason: None,
        ban_end_date: None,
        banned_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Missing,
    };

    let result = authorize(&verifier, &users, true, None).await;
    let err = result.err().expect("gate must reject");
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_header_is_unauthorized() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Missing,
    };

    let result = authorize(&verifier, &users, true, Some("Token abc")).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Missing,
    };

    let result = authorize(&verifier, &users, true, Some(&header("garbage"))).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn banned_user_is_forbidden() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Found(Box::new(user(id, UserRole::Student, UserStatus::Banned))),
    };

    let result = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN))).await;
    let err = result.err().expect("banned users must be rejected");
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn suspended_user_is_forbidden() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Found(Box::new(user(
            id,
            UserRole::Student,
            UserStatus::Suspended,
        ))),
    };

    let result = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN))).await;
    assert!(matches!(result, Err(AppError::Suspended)));
}

#[tokio::test]
async fn lapsed_timed_ban_passes_the_gate() {
    let id = Uuid::new_v4();
    let mut banned = user(id, UserRole::Student, UserStatus::Banned);
    banned.ban_end_date = Some(Utc::now() - Duration::hours(1));

    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Found(Box::new(banned)),
    };

    let current = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN)))
        .await
        .unwrap();
    assert_eq!(current.id, id);
}

#[tokio::test]
async fn first_login_without_record_passes_the_gate() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Missing,
    };

    let current = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN)))
        .await
        .unwrap();
    assert!(current.record.is_none());
    assert!(!current.is_admin());
}

#[tokio::test]
async fn lookup_error_degrades_open_when_enabled() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Error,
    };

    let current = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN)))
        .await
        .unwrap();

    // The request proceeds, but with no record, so admin access stays shut.
    assert!(current.record.is_none());
    assert!(require_admin(&current).is_err());
}

#[tokio::test]
async fn lookup_error_fails_closed_when_disabled() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Error,
    };

    let result = authorize(&verifier, &users, false, Some(&header(VALID_TOKEN))).await;
    let err = result.err().expect("fail-closed gate must reject");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn student_is_not_admin() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Found(Box::new(user(id, UserRole::Student, UserStatus::Active))),
    };

    let current = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN)))
        .await
        .unwrap();
    assert!(matches!(require_admin(&current), Err(AppError::Forbidden)));
}

#[tokio::test]
async fn admin_record_grants_admin() {
    let id = Uuid::new_v4();
    let verifier = StubVerifier { principal_id: id };
    let users = StubUserService {
        lookup: Lookup::Found(Box::new(user(id, UserRole::Admin, UserStatus::Active))),
    };

    let current = authorize(&verifier, &users, true, Some(&header(VALID_TOKEN)))
        .await
        .unwrap();
    assert!(require_admin(&current).is_ok());
}
