//! Bearer authentication and status-gate middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header::{AUTHORIZATION, USER_AGENT},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::net::SocketAddr;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{User, UserStatus};
use crate::errors::AppError;
use crate::services::{Actor, AuthVerifier, UserService};

/// Authenticated principal plus their application user record, if any.
///
/// A first-login principal has no record yet; they can still reach
/// non-admin endpoints.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub record: Option<User>,
}

impl CurrentUser {
    /// Admin access requires a readable record with the admin role.
    pub fn is_admin(&self) -> bool {
        self.record.as_ref().is_some_and(User::is_admin)
    }
}

/// Request provenance captured for the audit trail.
#[derive(Clone, Debug, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestMeta {
    pub fn actor(&self, user_id: Uuid) -> Actor {
        Actor {
            id: user_id,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// The full gate decision: token check, then user-record status check.
///
/// Kept free of HTTP machinery so the 401/403/degrade-open behavior is
/// testable directly against mock services.
pub async fn authorize(
    verifier: &dyn AuthVerifier,
    users: &dyn UserService,
    fail_open_on_lookup_error: bool,
    auth_header: Option<&str>,
) -> Result<CurrentUser, AppError> {
    let header = auth_header.ok_or(AppError::Unauthorized)?;
    let token = header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let principal = verifier.verify(token)?;

    let record = match users.find_user(principal.id).await {
        Ok(record) => record,
        Err(e) if fail_open_on_lookup_error => {
            // Degrade open: a status-lookup outage must not take the whole
            // API down with it. Admin access still requires a real record.
            tracing::warn!(
                user_id = %principal.id,
                error = %e,
                "Status lookup failed; proceeding without user record"
            );
            None
        }
        Err(e) => return Err(e),
    };

    if let Some(user) = &record {
        if user.is_restricted(Utc::now()) {
            return Err(match user.status {
                UserStatus::Suspended => AppError::Suspended,
                _ => AppError::Banned,
            });
        }
    }

    Ok(CurrentUser {
        id: principal.id,
        email: principal.email,
        record,
    })
}

/// Extract client IP, preferring proxy headers over the socket address.
fn client_ip(request: &Request) -> Option<String> {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            return Some(ip.trim().to_string());
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return Some(real_ip.to_string());
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
}

/// Authentication middleware.
///
/// Runs the gate and injects `CurrentUser` and `RequestMeta` into the
/// request extensions for handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let current_user = authorize(
        state.auth_verifier.as_ref(),
        state.user_service.as_ref(),
        state.config.fail_open_on_status_lookup_error,
        auth_header,
    )
    .await?;

    let meta = RequestMeta {
        ip_address: client_ip(&request),
        user_agent: request
            .headers()
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
    };

    request.extensions_mut().insert(current_user);
    request.extensions_mut().insert(meta);

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
