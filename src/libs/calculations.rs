//! Volume aggregation and streak calculations.
//!
//! Pure functions over the logged history. Nothing in here touches the
//! database or the clock; callers fetch the rows and pass "today" in, which
//! keeps every derivation re-entrant and directly testable.
//!
//! ## Two streak definitions
//!
//! The global streak (`calculate_streak`) and the per-ibadah streak
//! (`ibadah_streak`) deliberately differ: the global streak breaks as soon
//! as today has no session, while the per-ibadah streak grants today a
//! grace day so an unbroken run is not lost before the day is over. They
//! are kept as separate functions on purpose.

use crate::db::sessions::Session;
use crate::libs::ibadah::IbadahType;
use crate::libs::set::SessionSet;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Aggregated numbers for a single calendar day.
#[derive(Debug, Clone)]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Weighted sum of the day's set values.
    pub total_volume: f64,
    pub set_count: usize,
    pub breakdown: Vec<DailyIbadahBreakdown>,
}

/// Raw per-type share of one day.
#[derive(Debug, Clone)]
pub struct DailyIbadahBreakdown {
    pub ibadah_type_id: String,
    pub ibadah_name: String,
    pub total_value: f64,
    pub set_count: usize,
}

/// Aggregated numbers for a Monday-starting week.
#[derive(Debug, Clone)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_volume: f64,
    pub average_daily_volume: f64,
    pub active_days: usize,
    pub daily_stats: Vec<DailyStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    DailyVolume,
    SingleSet,
}

/// A personal best, recomputed from history on demand.
#[derive(Debug, Clone)]
pub struct PersonalRecord {
    pub ibadah_type_id: String,
    pub record_type: RecordType,
    pub value: f64,
    pub achieved_date: NaiveDate,
}

/// All-time per-type totals with the weighted share of the grand total.
#[derive(Debug, Clone)]
pub struct IbadahBreakdownItem {
    pub ibadah_type_id: String,
    pub ibadah_name: String,
    pub total_value: f64,
    pub weighted_value: f64,
    pub set_count: usize,
    pub percentage: f64,
}

/// Status of one day in the rolling per-ibadah week window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMark {
    Completed,
    Today,
    Missed,
}

/// Counts consecutive days with a session, walking backward from today.
///
/// The walk checks date presence, not list positions, so gaps end the
/// streak immediately. A missing session today yields 0.
pub fn calculate_streak(sessions: &[Session], today: NaiveDate) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let dates: HashSet<NaiveDate> = sessions.iter().map(|s| s.session_date).collect();

    let mut streak = 0;
    let mut cursor = today;
    while dates.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }

    streak
}

/// Counts consecutive days with at least one set of the given type.
///
/// Today is a grace day: an empty today does not break the run, it is
/// simply not counted yet. A miss on any earlier day stops the count.
pub fn ibadah_streak(sessions: &[Session], sets: &[SessionSet], ibadah_type_id: &str, today: NaiveDate) -> u32 {
    let logged_dates = dates_with_ibadah(sessions, sets, ibadah_type_id);

    let mut streak = 0;
    let mut cursor = today;
    loop {
        if logged_dates.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        } else if cursor == today {
            cursor -= Duration::days(1);
        } else {
            break;
        }
    }

    streak
}

/// The rolling 7-day window ending today for one ibadah type, oldest day
/// first. A day is `Completed` when any set of the type was logged on it.
pub fn ibadah_week(sessions: &[Session], sets: &[SessionSet], ibadah_type_id: &str, today: NaiveDate) -> Vec<(NaiveDate, DayMark)> {
    let logged_dates = dates_with_ibadah(sessions, sets, ibadah_type_id);

    (0..7)
        .map(|i| {
            let date = today - Duration::days(6 - i);
            let mark = if logged_dates.contains(&date) {
                DayMark::Completed
            } else if date == today {
                DayMark::Today
            } else {
                DayMark::Missed
            };
            (date, mark)
        })
        .collect()
}

/// Builds the stats for one session day.
///
/// `sets` must be the session's own sets. The total volume is weighted;
/// the per-type breakdown keeps raw values and drops types without sets.
pub fn calculate_daily_stats(session: &Session, sets: &[SessionSet], types: &[IbadahType]) -> DailyStats {
    let weights = weight_map(types);

    let breakdown = types
        .iter()
        .filter_map(|ibadah| {
            let type_sets: Vec<&SessionSet> = sets.iter().filter(|s| s.ibadah_type_id == ibadah.id).collect();
            if type_sets.is_empty() {
                return None;
            }
            Some(DailyIbadahBreakdown {
                ibadah_type_id: ibadah.id.clone(),
                ibadah_name: ibadah.name.clone(),
                total_value: type_sets.iter().map(|s| s.value).sum(),
                set_count: type_sets.len(),
            })
        })
        .collect();

    DailyStats {
        date: session.session_date,
        total_volume: weighted_volume(sets, &weights),
        set_count: sets.len(),
        breakdown,
    }
}

/// Builds the stats for the Monday-starting week containing
/// `reference_date`, zero-filling days without a session.
///
/// `average_daily_volume` averages over active days only and is 0 when the
/// week has none.
pub fn calculate_weekly_stats(
    sessions: &[Session],
    all_sets: &[SessionSet],
    types: &[IbadahType],
    reference_date: NaiveDate,
) -> WeeklyStats {
    let (week_start, week_end) = week_bounds(reference_date);
    let by_date: HashMap<NaiveDate, &Session> = sessions.iter().map(|s| (s.session_date, s)).collect();

    let daily_stats: Vec<DailyStats> = (0..7)
        .map(|i| {
            let date = week_start + Duration::days(i);
            match by_date.get(&date) {
                Some(session) => {
                    let session_sets: Vec<SessionSet> =
                        all_sets.iter().filter(|s| s.session_id == session.id).cloned().collect();
                    calculate_daily_stats(session, &session_sets, types)
                }
                None => DailyStats {
                    date,
                    total_volume: 0.0,
                    set_count: 0,
                    breakdown: Vec::new(),
                },
            }
        })
        .collect();

    let total_volume: f64 = daily_stats.iter().map(|d| d.total_volume).sum();
    let active_days = daily_stats.iter().filter(|d| d.total_volume > 0.0).count();

    WeeklyStats {
        week_start,
        week_end,
        total_volume,
        average_daily_volume: if active_days > 0 { total_volume / active_days as f64 } else { 0.0 },
        active_days,
        daily_stats,
    }
}

/// Finds the personal bests over the whole history.
///
/// Two records per type: the best single set value and the best same-day
/// raw total. Comparisons are strictly greater, so when a value is tied
/// the earliest date keeps the record.
pub fn find_personal_records(sessions: &[Session], all_sets: &[SessionSet]) -> Vec<PersonalRecord> {
    let mut by_date: Vec<&Session> = sessions.iter().collect();
    by_date.sort_by_key(|s| s.session_date);

    let mut set_bests: BTreeMap<String, (f64, NaiveDate)> = BTreeMap::new();
    let mut daily_bests: BTreeMap<String, (f64, NaiveDate)> = BTreeMap::new();

    for session in by_date {
        let session_sets: Vec<&SessionSet> = all_sets.iter().filter(|s| s.session_id == session.id).collect();

        let mut day_totals: BTreeMap<&str, f64> = BTreeMap::new();
        for set in &session_sets {
            *day_totals.entry(set.ibadah_type_id.as_str()).or_insert(0.0) += set.value;

            let best = set_bests.get(&set.ibadah_type_id);
            if best.map_or(true, |(value, _)| set.value > *value) {
                set_bests.insert(set.ibadah_type_id.clone(), (set.value, session.session_date));
            }
        }

        for (type_id, total) in day_totals {
            let best = daily_bests.get(type_id);
            if best.map_or(true, |(value, _)| total > *value) {
                daily_bests.insert(type_id.to_string(), (total, session.session_date));
            }
        }
    }

    let mut records = Vec::new();
    for (type_id, (value, date)) in daily_bests {
        records.push(PersonalRecord {
            ibadah_type_id: type_id,
            record_type: RecordType::DailyVolume,
            value,
            achieved_date: date,
        });
    }
    for (type_id, (value, date)) in set_bests {
        records.push(PersonalRecord {
            ibadah_type_id: type_id,
            record_type: RecordType::SingleSet,
            value,
            achieved_date: date,
        });
    }

    records
}

/// All-time per-type totals, weighted share included, sorted descending by
/// weighted value. Types without a single set are omitted.
pub fn ibadah_breakdown(all_sets: &[SessionSet], types: &[IbadahType]) -> Vec<IbadahBreakdownItem> {
    let mut items: Vec<IbadahBreakdownItem> = types
        .iter()
        .filter_map(|ibadah| {
            let type_sets: Vec<&SessionSet> = all_sets.iter().filter(|s| s.ibadah_type_id == ibadah.id).collect();
            if type_sets.is_empty() {
                return None;
            }
            let total_value: f64 = type_sets.iter().map(|s| s.value).sum();
            Some(IbadahBreakdownItem {
                ibadah_type_id: ibadah.id.clone(),
                ibadah_name: ibadah.name.clone(),
                total_value,
                weighted_value: total_value * ibadah.weight,
                set_count: type_sets.len(),
                percentage: 0.0,
            })
        })
        .collect();

    items.sort_by(|a, b| b.weighted_value.partial_cmp(&a.weighted_value).unwrap_or(std::cmp::Ordering::Equal));

    let grand_total: f64 = items.iter().map(|i| i.weighted_value).sum();
    if grand_total > 0.0 {
        for item in &mut items {
            item.percentage = item.weighted_value / grand_total * 100.0;
        }
    }

    items
}

/// Mean raw volume across the most recent `days` sessions. 0 with no
/// history.
pub fn average_volume(sessions: &[Session], all_sets: &[SessionSet], days: usize) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }

    let mut recent: Vec<&Session> = sessions.iter().collect();
    recent.sort_by(|a, b| b.session_date.cmp(&a.session_date));
    recent.truncate(days);

    let total: f64 = recent
        .iter()
        .map(|session| {
            all_sets
                .iter()
                .filter(|s| s.session_id == session.id)
                .map(|s| s.value)
                .sum::<f64>()
        })
        .sum();

    total / recent.len() as f64
}

/// Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// Weighted sum of set values; unknown type ids count with weight 1.
pub fn weighted_volume(sets: &[SessionSet], weights: &HashMap<String, f64>) -> f64 {
    sets.iter().map(|s| s.value * weights.get(&s.ibadah_type_id).copied().unwrap_or(1.0)).sum()
}

/// Id-to-weight lookup built from the registry.
pub fn weight_map(types: &[IbadahType]) -> HashMap<String, f64> {
    types.iter().map(|t| (t.id.clone(), t.weight)).collect()
}

fn dates_with_ibadah(sessions: &[Session], sets: &[SessionSet], ibadah_type_id: &str) -> HashSet<NaiveDate> {
    let session_dates: HashMap<i64, NaiveDate> = sessions.iter().map(|s| (s.id, s.session_date)).collect();

    sets.iter()
        .filter(|s| s.ibadah_type_id == ibadah_type_id)
        .filter_map(|s| session_dates.get(&s.session_id).copied())
        .collect()
}
