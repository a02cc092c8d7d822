//! Core types and utilities for the gym admin toolkit

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod actions;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use dashboard::DashboardSummary;
pub use error::{Error, Result};
pub use types::{
    Category, Color, MembershipPlan, Order, OrderItem, OrderStatus, Payment, PaymentStatus,
    Product, Role, Subscription, SubscriptionStatus, User, UserStatus,
};
pub use validation::FormErrors;

/// Initialize the logging system
///
/// `level` is used when `RUST_LOG` is not set. With `json` the output is
/// one JSON object per line, otherwise the pretty human format.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Configuration {
        message: format!("failed to initialize logging: {e}"),
    })
}
