//! Pricing and allocation-pool engine for the tour operator back office.

pub mod allocation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod store;

pub use config::Settings;
pub use error::{AppError, Result};
