//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Shared signing secret of the hosted identity provider.
    auth_jwt_secret: String,
    /// Optional shared secret protecting the cron endpoint.
    pub cron_secret: Option<String>,
    /// When the user-record status lookup fails, let the request proceed
    /// unrestricted instead of failing closed. Mirrors the upstream policy
    /// of prioritizing booking availability over strict enforcement.
    pub fail_open_on_status_lookup_error: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("auth_jwt_secret", &"[REDACTED]")
            .field("cron_secret", &self.cron_secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "fail_open_on_status_lookup_error",
                &self.fail_open_on_status_lookup_error,
            )
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if AUTH_JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let auth_jwt_secret = env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("AUTH_JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("AUTH_JWT_SECRET environment variable must be set in production");
            }
        });

        if auth_jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "AUTH_JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            auth_jwt_secret,
            cron_secret: env::var("CRON_SECRET").ok().filter(|s| !s.is_empty()),
            fail_open_on_status_lookup_error: env::var("FAIL_OPEN_ON_STATUS_LOOKUP_ERROR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Get provider JWT secret bytes for token verification.
    pub fn auth_jwt_secret_bytes(&self) -> &[u8] {
        self.auth_jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Configuration for tests: no external services assumed.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            auth_jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            cron_secret: None,
            fail_open_on_status_lookup_error: true,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
