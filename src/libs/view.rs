use crate::db::sessions::Session;
use crate::libs::adhkar::{AdhkarItem, AdhkarSet, AdhkarStore};
use crate::libs::burnout::BurnoutWarning;
use crate::libs::calculations::{DailyStats, DayMark, IbadahBreakdownItem, PersonalRecord, RecordType, WeeklyStats};
use crate::libs::formatter::{format_duration, format_volume};
use crate::libs::ibadah::{IbadahType, IbadahUnit};
use crate::libs::set::SessionSet;
use crate::libs::suggestions::OverloadSuggestion;
use prettytable::{row, Table};
use std::collections::HashMap;
use std::error::Error;

pub struct View {}

impl View {
    pub fn ibadah_types(types: &[IbadahType]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "UNIT", "WEIGHT", "STATE"]);
        for ibadah in types {
            let state = if ibadah.is_archived { "archived" } else { "active" };
            table.add_row(row![ibadah.id, ibadah.name, ibadah.unit, ibadah.weight, state]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sets(sets: &[SessionSet], types: &[IbadahType]) -> Result<(), Box<dyn Error>> {
        let units: HashMap<&str, IbadahUnit> = types.iter().map(|t| (t.id.as_str(), t.unit)).collect();
        let names: HashMap<&str, &str> = types.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();

        let mut table = Table::new();
        table.add_row(row!["ID", "IBADAH", "VALUE", "DURATION", "LOGGED AT", "NOTES"]);
        for set in sets {
            let unit = units.get(set.ibadah_type_id.as_str()).copied().unwrap_or(IbadahUnit::Count);
            let name = names.get(set.ibadah_type_id.as_str()).copied().unwrap_or(set.ibadah_type_id.as_str());
            let duration = set.duration_seconds.map(format_duration).unwrap_or_else(|| "-".to_string());
            table.add_row(row![
                set.id,
                name,
                format!("{} {}", format_volume(set.value, unit), unit.label()),
                duration,
                set.logged_at.format("%H:%M"),
                set.notes.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sessions(sessions: &[Session]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "STARTED", "STATE", "VOLUME", "NOTES"]);
        for session in sessions {
            let state = match session.completed_at {
                Some(completed) => format!("completed {}", completed.format("%H:%M")),
                None => "open".to_string(),
            };
            table.add_row(row![
                session.id,
                session.session_date,
                session.started_at.format("%H:%M"),
                state,
                format!("{:.1}", session.total_volume),
                session.notes.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn daily_stats(stats: &DailyStats, types: &[IbadahType]) -> Result<(), Box<dyn Error>> {
        let units: HashMap<&str, IbadahUnit> = types.iter().map(|t| (t.id.as_str(), t.unit)).collect();

        let mut table = Table::new();
        table.add_row(row!["IBADAH", "TOTAL", "SETS"]);
        for item in &stats.breakdown {
            let unit = units.get(item.ibadah_type_id.as_str()).copied().unwrap_or(IbadahUnit::Count);
            table.add_row(row![
                item.ibadah_name,
                format!("{} {}", format_volume(item.total_value, unit), unit.label()),
                item.set_count
            ]);
        }
        table.add_row(row!["TOTAL VOLUME", format!("{:.1}", stats.total_volume), stats.set_count]);
        table.printstd();

        Ok(())
    }

    pub fn weekly_stats(stats: &WeeklyStats) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["DAY", "DATE", "VOLUME", "SETS"]);
        for day in &stats.daily_stats {
            table.add_row(row![
                day.date.format("%a"),
                day.date,
                format!("{:.1}", day.total_volume),
                day.set_count
            ]);
        }
        table.add_row(row![
            "WEEK",
            format!("{} active day(s)", stats.active_days),
            format!("{:.1}", stats.total_volume),
            format!("avg {:.1}/day", stats.average_daily_volume)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn records(records: &[PersonalRecord], types: &[IbadahType]) -> Result<(), Box<dyn Error>> {
        let units: HashMap<&str, IbadahUnit> = types.iter().map(|t| (t.id.as_str(), t.unit)).collect();
        let names: HashMap<&str, &str> = types.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();

        let mut table = Table::new();
        table.add_row(row!["IBADAH", "RECORD", "VALUE", "ACHIEVED"]);
        for record in records {
            let unit = units.get(record.ibadah_type_id.as_str()).copied().unwrap_or(IbadahUnit::Count);
            let name = names
                .get(record.ibadah_type_id.as_str())
                .copied()
                .unwrap_or(record.ibadah_type_id.as_str());
            let kind = match record.record_type {
                RecordType::DailyVolume => "best day",
                RecordType::SingleSet => "best set",
            };
            table.add_row(row![
                name,
                kind,
                format!("{} {}", format_volume(record.value, unit), unit.label()),
                record.achieved_date
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn breakdown(items: &[IbadahBreakdownItem], types: &[IbadahType]) -> Result<(), Box<dyn Error>> {
        let units: HashMap<&str, IbadahUnit> = types.iter().map(|t| (t.id.as_str(), t.unit)).collect();

        let mut table = Table::new();
        table.add_row(row!["IBADAH", "TOTAL", "SETS", "VOLUME", "SHARE"]);
        for item in items {
            let unit = units.get(item.ibadah_type_id.as_str()).copied().unwrap_or(IbadahUnit::Count);
            table.add_row(row![
                item.ibadah_name,
                format!("{} {}", format_volume(item.total_value, unit), unit.label()),
                item.set_count,
                format!("{:.1}", item.weighted_value),
                format!("{:.0}%", item.percentage)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn suggestions(suggestions: &[OverloadSuggestion]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["IBADAH", "CURRENT AVG", "SUGGESTED", "WHY"]);
        for suggestion in suggestions {
            table.add_row(row![
                suggestion.ibadah_name,
                suggestion.current_average,
                suggestion.suggested_value,
                suggestion.reason
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn burnout(warning: &BurnoutWarning) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["SEVERITY", "SUGGESTED DELOAD", "ADVICE"]);
        table.add_row(row![
            warning.severity.label(),
            format!("{}%", warning.suggested_deload_percentage),
            warning.message
        ]);
        table.printstd();

        Ok(())
    }

    pub fn adhkar(store: &AdhkarStore, set: AdhkarSet, items: &[AdhkarItem]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ITEM", "RECITATION", "PROGRESS"]);
        for item in items {
            let progress = store.progress(set, item.id);
            let mark = if progress >= item.count { "✓" } else { " " };
            table.add_row(row![item.id, item.name, format!("{}/{} {}", progress, item.count, mark)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn ibadah_streaks(rows: &[(String, u32, Vec<DayMark>)]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["IBADAH", "STREAK", "LAST 7 DAYS"]);
        for (name, streak, week) in rows {
            let dots: String = week
                .iter()
                .map(|mark| match mark {
                    DayMark::Completed => '●',
                    DayMark::Today => '○',
                    DayMark::Missed => '·',
                })
                .collect();
            table.add_row(row![name, format!("{} day(s)", streak), dots]);
        }
        table.printstd();

        Ok(())
    }

    pub fn mvd_status(status: &[(String, f64, f64, bool)]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["IBADAH", "MINIMUM", "LOGGED", "MET"]);
        for (name, minimum, logged, met) in status {
            table.add_row(row![name, minimum, logged, if *met { "✓" } else { "✗" }]);
        }
        table.printstd();

        Ok(())
    }
}
