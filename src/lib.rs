//! ORBIT - University facility booking and administration API
//!
//! Students reserve facilities, administrators review requests, moderate
//! accounts, publish alerts and FAQs, and audit activity. Identity lives
//! with a hosted provider; this crate verifies its bearer tokens and owns
//! everything behind them.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Booking, BookingStatus, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
