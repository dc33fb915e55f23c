//! Daily stats command.
//!
//! Shows the chosen day's volume breakdown, the global streak and, when
//! minimum-viable-day targets are configured, how the day measures up
//! against them. The expiry sweep runs first so a stale open session from
//! yesterday does not linger in today's numbers.

use crate::libs::calculations::{calculate_daily_stats, calculate_streak, ibadah_streak, ibadah_week};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Date to show stats for (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let mut service = SessionService::new()?;
    service.check_and_expire()?;

    let date = parse_date(&args.date)?;
    let today = Local::now().date_naive();

    let sessions = service.sessions.fetch_all()?;
    let streak = calculate_streak(&sessions, today);
    msg_print!(Message::StreakDays(streak), true);

    let Some(session) = service.sessions.fetch_by_date(date)? else {
        msg_print!(Message::SessionNotFoundForDate(date.to_string()));
        return Ok(());
    };

    let sets = service.sets.fetch_by_session(session.id)?;
    let types = service.types.fetch_all()?;
    let stats = calculate_daily_stats(&session, &sets, &types);

    msg_print!(Message::DailyStatsHeader(date.to_string()));
    if stats.set_count == 0 {
        msg_print!(Message::NoDataToShow);
    } else {
        View::daily_stats(&stats, &types).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    ibadah_streaks(&mut service, today)?;
    mvd_status(&stats, &types, date)?;

    Ok(())
}

/// Per-ibadah streaks with the rolling 7-day window, for every active
/// type that has ever been logged.
fn ibadah_streaks(service: &mut SessionService, today: NaiveDate) -> Result<()> {
    let sessions = service.sessions.fetch_all()?;
    let all_sets = service.sets.fetch_all()?;

    let rows: Vec<(String, u32, Vec<_>)> = service
        .types
        .fetch_active()?
        .into_iter()
        .filter(|t| all_sets.iter().any(|s| s.ibadah_type_id == t.id))
        .map(|t| {
            let streak = ibadah_streak(&sessions, &all_sets, &t.id, today);
            let week = ibadah_week(&sessions, &all_sets, &t.id, today)
                .into_iter()
                .map(|(_, mark)| mark)
                .collect();
            (t.name, streak, week)
        })
        .collect();

    if !rows.is_empty() {
        View::ibadah_streaks(&rows).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    Ok(())
}

/// Compares the day's raw per-type totals against configured minimums.
fn mvd_status(
    stats: &crate::libs::calculations::DailyStats,
    types: &[crate::libs::ibadah::IbadahType],
    date: NaiveDate,
) -> Result<()> {
    let config = Config::read()?;
    if config.minimum_viable_days.is_empty() {
        return Ok(());
    }

    let status: Vec<(String, f64, f64, bool)> = config
        .minimum_viable_days
        .iter()
        .map(|mvd| {
            let name = types
                .iter()
                .find(|t| t.id == mvd.ibadah_type_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| mvd.ibadah_type_id.clone());
            let logged = stats
                .breakdown
                .iter()
                .find(|b| b.ibadah_type_id == mvd.ibadah_type_id)
                .map(|b| b.total_value)
                .unwrap_or(0.0);
            (name, mvd.minimum_value, logged, logged >= mvd.minimum_value)
        })
        .collect();

    msg_print!(Message::MvdHeader(date.to_string()), true);
    View::mvd_status(&status).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
