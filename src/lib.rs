//! RentDesk Equipment Rental Server
//!
//! REST JSON API for an equipment rental shop: rental catalog, shop closure
//! periods, advance booking lead time and booking submission. The date rules
//! that drive the booking date picker live in [`booking`] and have no I/O.

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
