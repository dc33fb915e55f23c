//! Weekly volume table command.
//!
//! Renders the Monday-starting week containing the given date: one row per
//! day with its weighted volume and set count, zero-filled for quiet days,
//! plus the week totals and the active-day average.

use crate::libs::calculations::calculate_weekly_stats;
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Any date inside the week to display (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,
}

pub fn cmd(args: WeekArgs) -> Result<()> {
    let mut service = SessionService::new()?;

    let date = parse_date(&args.date)?;
    let sessions = service.sessions.fetch_all()?;
    let sets = service.sets.fetch_all()?;
    let types = service.types.fetch_all()?;

    let stats = calculate_weekly_stats(&sessions, &sets, &types, date);

    msg_print!(
        Message::WeeklyStatsHeader(stats.week_start.to_string(), stats.week_end.to_string()),
        true
    );
    View::weekly_stats(&stats).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
