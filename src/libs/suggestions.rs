//! Progressive overload suggestions.
//!
//! Proposes small target increases for activities the user has been
//! consistent with. The gate is global: suggestions only appear at all when
//! at least 80% of the trailing 14 days have a session. Per activity, the
//! 14-day average and its trend decide whether an increase makes sense; the
//! increase factor is drawn uniformly from [1.05, 1.10] per computation,
//! with the RNG injected so callers can make the draw deterministic.

use crate::db::sessions::Session;
use crate::libs::ibadah::IbadahType;
use crate::libs::set::SessionSet;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Minimum fraction of the trailing 14 days with a session before any
/// suggestion is generated.
pub const CONSISTENCY_THRESHOLD: f64 = 0.8;
/// Bounds of the suggested increase factor.
pub const OVERLOAD_INCREASE_MIN: f64 = 1.05;
pub const OVERLOAD_INCREASE_MAX: f64 = 1.10;
/// Window for suggestion gating and averages.
const SUGGESTION_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

/// Rolling average and direction for one ibadah type.
#[derive(Debug, Clone)]
pub struct IbadahAverages {
    pub average: f64,
    pub trend: Trend,
}

/// A proposed new daily target for one activity.
#[derive(Debug, Clone)]
pub struct OverloadSuggestion {
    pub ibadah_type_id: String,
    pub ibadah_name: String,
    pub current_average: f64,
    pub suggested_value: f64,
    pub reason: String,
}

/// Fraction of the trailing `days` (today inclusive) that have a session.
pub fn calculate_consistency(sessions: &[Session], days: i64, today: NaiveDate) -> f64 {
    if days <= 0 {
        return 0.0;
    }

    let dates: HashSet<NaiveDate> = sessions.iter().map(|s| s.session_date).collect();
    let hit = (0..days).filter(|i| dates.contains(&(today - Duration::days(*i)))).count();

    hit as f64 / days as f64
}

/// Mean raw value per active day in the trailing window, plus the trend.
///
/// Days without a logged set of the type are excluded from the average,
/// not counted as zero. The trend splits the window in half (recent half
/// against older half, each averaged over its own active days) and calls
/// it increasing above a 10% rise, decreasing below a 10% drop.
pub fn ibadah_averages(
    sessions: &[Session],
    all_sets: &[SessionSet],
    ibadah_type_id: &str,
    days: i64,
    today: NaiveDate,
) -> IbadahAverages {
    let by_date: HashMap<NaiveDate, &Session> = sessions.iter().map(|s| (s.session_date, s)).collect();

    // Index 0 is today, growing towards the oldest day in the window
    let daily_totals: Vec<f64> = (0..days)
        .map(|i| {
            let date = today - Duration::days(i);
            match by_date.get(&date) {
                Some(session) => all_sets
                    .iter()
                    .filter(|s| s.session_id == session.id && s.ibadah_type_id == ibadah_type_id)
                    .map(|s| s.value)
                    .sum(),
                None => 0.0,
            }
        })
        .collect();

    let active: Vec<f64> = daily_totals.iter().copied().filter(|t| *t > 0.0).collect();
    let average = if active.is_empty() { 0.0 } else { active.iter().sum::<f64>() / active.len() as f64 };

    let half = (days / 2) as usize;
    let recent_half = &daily_totals[..half.min(daily_totals.len())];
    let older_half = &daily_totals[half.min(daily_totals.len())..];

    let recent_avg = active_mean(recent_half);
    let older_avg = active_mean(older_half);

    let trend = if recent_avg > older_avg * 1.1 {
        Trend::Increasing
    } else if recent_avg < older_avg * 0.9 {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    IbadahAverages { average, trend }
}

/// Generates overload suggestions for every eligible non-archived type.
///
/// Gated on the global 14-day consistency check. A type qualifies with a
/// nonzero 14-day average and a trend that is not decreasing; the
/// suggestion is only emitted when the rounded target actually exceeds the
/// current average.
pub fn generate_overload_suggestions<R: Rng>(
    sessions: &[Session],
    all_sets: &[SessionSet],
    types: &[IbadahType],
    today: NaiveDate,
    rng: &mut R,
) -> Vec<OverloadSuggestion> {
    let mut suggestions = Vec::new();

    let consistency = calculate_consistency(sessions, SUGGESTION_WINDOW_DAYS, today);
    if consistency < CONSISTENCY_THRESHOLD {
        return suggestions;
    }

    for ibadah in types.iter().filter(|t| !t.is_archived) {
        let averages = ibadah_averages(sessions, all_sets, &ibadah.id, SUGGESTION_WINDOW_DAYS, today);

        if averages.average == 0.0 || averages.trend == Trend::Decreasing {
            continue;
        }

        let factor = rng.gen_range(OVERLOAD_INCREASE_MIN..=OVERLOAD_INCREASE_MAX);
        let suggested_value = round_one_decimal(averages.average * factor);
        let current_average = round_one_decimal(averages.average);

        if suggested_value > current_average {
            suggestions.push(OverloadSuggestion {
                ibadah_type_id: ibadah.id.clone(),
                ibadah_name: ibadah.name.clone(),
                current_average,
                suggested_value,
                reason: format!("You've been consistent with {}. Consider a small increase.", ibadah.name),
            });
        }
    }

    suggestions
}

/// Stricter 7-day check used when deciding whether to surface a suggestion
/// hint for a single activity.
pub fn should_show_suggestion(sessions: &[Session], all_sets: &[SessionSet], ibadah_type_id: &str, today: NaiveDate) -> bool {
    let averages = ibadah_averages(sessions, all_sets, ibadah_type_id, 7, today);
    if averages.average == 0.0 {
        return false;
    }

    let consistency = calculate_consistency(sessions, 7, today);
    consistency >= 0.7 && averages.trend != Trend::Decreasing
}

fn active_mean(totals: &[f64]) -> f64 {
    let active: Vec<f64> = totals.iter().copied().filter(|t| *t > 0.0).collect();
    active.iter().sum::<f64>() / active.len().max(1) as f64
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
