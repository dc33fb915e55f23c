//! # Ajr - Ibadah Activity Tracking and Logging
//!
//! A command-line utility for logging daily worship activities, tracking
//! sessions and streaks, and generating volume analytics.
//!
//! ## Features
//!
//! - **Daily Sessions**: One session per calendar day with automatic expiry
//! - **Set Logging**: Quran pages, qiyam minutes, dhikr counts, charity, fasting
//! - **Weighted Volume**: Cross-activity comparison through per-type weights
//! - **Streaks & Records**: Global and per-ibadah streaks, personal bests
//! - **Weekly Analytics**: Monday-based weekly tables with active-day averages
//! - **Insights**: Progressive overload suggestions and burnout warnings
//! - **Adhkar Tracking**: Morning and evening recitation progress with daily reset
//! - **Data Export**: JSON backup/restore and CSV set logs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ajr::commands::Cli;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
