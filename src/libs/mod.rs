//! Core library modules for the ajr application.
//!
//! Serves as the main entry point for all ajr library components, providing
//! a centralized access point to the application's core functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Session Lifecycle**: Daily session state machine with expiry and volume upkeep
//! - **Aggregation Engine**: Streaks, daily/weekly stats, personal records, breakdowns
//! - **Insights**: Progressive overload suggestions and burnout detection
//! - **Adhkar Tracking**: Daily-reset recitation progress
//! - **User Interface**: Console rendering, data export, formatting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ajr::libs::session::SessionService;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut service = SessionService::new()?;
//! let session = service.get_or_create_today()?;
//! service.add_set(session.id, "quran", 5.0, None, None)?;
//! # Ok(())
//! # }
//! ```

pub mod adhkar;
pub mod burnout;
pub mod calculations;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod ibadah;
pub mod messages;
pub mod session;
pub mod set;
pub mod suggestions;
pub mod view;
