//! Burnout detection from week-over-week volume.
//!
//! Compares the raw (unweighted) set volume of the trailing 7 days against
//! the 7 days before that. A sharp drop between two reasonably active weeks
//! is flagged with a severity and a suggested deload, a temporary reduction
//! of daily targets. Sparse data never triggers a warning: a quiet prior
//! week or fewer than three active days on either side means there is
//! nothing meaningful to compare.

use crate::db::sessions::Session;
use crate::libs::set::SessionSet;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Volume ratio above which the current week counts as normal.
pub const BURNOUT_THRESHOLD: f64 = 0.7;
/// Minimum active days per compared week.
const MIN_ACTIVE_DAYS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// Result of a burnout check. `severity`, `message` and the deload
/// percentage are only meaningful when `detected` is true.
#[derive(Debug, Clone)]
pub struct BurnoutWarning {
    pub detected: bool,
    pub severity: Severity,
    pub message: String,
    pub suggested_deload_percentage: u32,
}

impl BurnoutWarning {
    fn none() -> Self {
        BurnoutWarning {
            detected: false,
            severity: Severity::Mild,
            message: String::new(),
            suggested_deload_percentage: 0,
        }
    }
}

struct WeekVolume {
    total_volume: f64,
    active_days: usize,
}

/// Raw volume and active-day count of the 7-day window ending at `end`.
fn weekly_volume(sessions: &[Session], all_sets: &[SessionSet], end: NaiveDate) -> WeekVolume {
    let dates: HashSet<NaiveDate> = (0..7).map(|i| end - Duration::days(i)).collect();
    let week_sessions: Vec<&Session> = sessions.iter().filter(|s| dates.contains(&s.session_date)).collect();

    let total_volume = week_sessions
        .iter()
        .map(|session| {
            all_sets
                .iter()
                .filter(|s| s.session_id == session.id)
                .map(|s| s.value)
                .sum::<f64>()
        })
        .sum();

    WeekVolume {
        total_volume,
        active_days: week_sessions.len(),
    }
}

/// Classifies the current week's volume against the previous week's.
///
/// Guard conditions first: no detection when the previous week logged
/// nothing, or when either week has fewer than three active days, or when
/// the ratio stays at or above 0.7. Below that the drop is classified as
/// mild (ratio >= 0.5, 10% deload), moderate (>= 0.3, 25%) or severe
/// (below 0.3, 40%).
pub fn detect_burnout(sessions: &[Session], all_sets: &[SessionSet], today: NaiveDate) -> BurnoutWarning {
    let current_week = weekly_volume(sessions, all_sets, today);
    let previous_week = weekly_volume(sessions, all_sets, today - Duration::days(7));

    if previous_week.total_volume == 0.0 || previous_week.active_days < MIN_ACTIVE_DAYS {
        return BurnoutWarning::none();
    }

    if current_week.active_days < MIN_ACTIVE_DAYS {
        return BurnoutWarning::none();
    }

    let ratio = current_week.total_volume / previous_week.total_volume;

    if ratio >= BURNOUT_THRESHOLD {
        return BurnoutWarning::none();
    }

    let (severity, message, suggested_deload_percentage) = if ratio >= 0.5 {
        (
            Severity::Mild,
            "Your volume has decreased slightly. Consider maintaining your current pace or taking a light day.".to_string(),
            10,
        )
    } else if ratio >= 0.3 {
        (
            Severity::Moderate,
            "Your ibadah volume has dropped noticeably. A recovery period might help restore your energy.".to_string(),
            25,
        )
    } else {
        (
            Severity::Severe,
            "Significant decrease detected. It's recommended to take a deload week and focus on your minimum viable day.".to_string(),
            40,
        )
    };

    BurnoutWarning {
        detected: true,
        severity,
        message,
        suggested_deload_percentage,
    }
}

/// Reduced daily target for a deload, rounded to one decimal.
pub fn deload_recommendation(current_average: f64, deload_percentage: u32) -> f64 {
    (current_average * (1.0 - deload_percentage as f64 / 100.0) * 10.0).round() / 10.0
}

/// Whether the user is in a recovery-worthy state (anything beyond a mild
/// warning).
pub fn is_recovery_period_active(sessions: &[Session], all_sets: &[SessionSet], today: NaiveDate) -> bool {
    let warning = detect_burnout(sessions, all_sets, today);
    warning.detected && warning.severity != Severity::Mild
}
