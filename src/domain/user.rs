//! User domain entity and related types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_STUDENT, STATUS_ACTIVE, STATUS_BANNED, STATUS_SUSPENDED};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Student,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Student => write!(f, "{}", ROLE_STUDENT),
        }
    }
}

/// Account status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Banned,
    Suspended,
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_BANNED => UserStatus::Banned,
            STATUS_SUSPENDED => UserStatus::Suspended,
            _ => UserStatus::Active,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "{}", STATUS_ACTIVE),
            UserStatus::Banned => write!(f, "{}", STATUS_BANNED),
            UserStatus::Suspended => write!(f, "{}", STATUS_SUSPENDED),
        }
    }
}

/// Ban duration options accepted by the admin ban operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BanDuration {
    Permanent,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "1month")]
    OneMonth,
    Custom,
}

impl BanDuration {
    /// Compute the ban end date for this duration.
    ///
    /// Permanent bans have no end date. Custom bans require an explicit
    /// end date, which must lie in the future.
    pub fn end_date(
        &self,
        now: DateTime<Utc>,
        custom_date: Option<DateTime<Utc>>,
    ) -> AppResult<Option<DateTime<Utc>>> {
        match self {
            BanDuration::Permanent => Ok(None),
            BanDuration::OneDay => Ok(Some(now + Duration::days(1))),
            BanDuration::OneWeek => Ok(Some(now + Duration::weeks(1))),
            BanDuration::OneMonth => Ok(Some(now + Duration::days(30))),
            BanDuration::Custom => {
                let date = custom_date.ok_or_else(|| {
                    AppError::validation("custom_date is required for a custom ban duration")
                })?;
                if date <= now {
                    return Err(AppError::validation("custom_date must be in the future"));
                }
                Ok(Some(date))
            }
        }
    }
}

/// Application-level user record, distinct from the identity provider account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Matches the identity provider's subject id.
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub ban_reason: Option<String>,
    /// None on a banned user means the ban is permanent.
    pub ban_end_date: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account is currently blocked from using the system.
    ///
    /// A timed ban whose end date has passed no longer restricts, even if
    /// an admin has not yet run the unban operation.
    pub fn is_restricted(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            UserStatus::Active => false,
            UserStatus::Suspended => true,
            UserStatus::Banned => match self.ban_end_date {
                Some(end) => end > now,
                None => true,
            },
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            status: user.status,
            ban_reason: user.ban_reason,
            ban_end_date: user.ban_end_date,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(status: UserStatus, ban_end: Option<DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "test@university.edu".to_string(),
            first_name: None,
            last_name: None,
            role: UserRole::Student,
            status,
            ban_reason: None,
            ban_end_date: ban_end,
            banned_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_user_is_not_restricted() {
        assert!(!user(UserStatus::Active, None).is_restricted(Utc::now()));
    }

    #[test]
    fn permanent_ban_restricts() {
        assert!(user(UserStatus::Banned, None).is_restricted(Utc::now()));
    }

    #[test]
    fn lapsed_timed_ban_does_not_restrict() {
        let now = Utc::now();
        let u = user(UserStatus::Banned, Some(now - Duration::hours(1)));
        assert!(!u.is_restricted(now));
    }

    #[test]
    fn running_timed_ban_restricts() {
        let now = Utc::now();
        let u = user(UserStatus::Banned, Some(now + Duration::hours(1)));
        assert!(u.is_restricted(now));
    }

    #[test]
    fn suspension_restricts_regardless_of_dates() {
        assert!(user(UserStatus::Suspended, None).is_restricted(Utc::now()));
    }

    #[test]
    fn ban_duration_end_dates() {
        let now = Utc::now();
        assert_eq!(BanDuration::Permanent.end_date(now, None).unwrap(), None);
        assert_eq!(
            BanDuration::OneWeek.end_date(now, None).unwrap(),
            Some(now + Duration::weeks(1))
        );
        assert!(BanDuration::Custom.end_date(now, None).is_err());
        assert!(BanDuration::Custom
            .end_date(now, Some(now - Duration::days(1)))
            .is_err());
    }
}
