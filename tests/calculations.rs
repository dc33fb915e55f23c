#[cfg(test)]
mod tests {
    use ajr::db::sessions::Session;
    use ajr::libs::calculations::{
        average_volume, calculate_daily_stats, calculate_streak, calculate_weekly_stats, find_personal_records,
        ibadah_breakdown, ibadah_streak, ibadah_week, week_bounds, DayMark, RecordType,
    };
    use ajr::libs::ibadah::{IbadahType, IbadahUnit};
    use ajr::libs::set::SessionSet;
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn timestamp(d: NaiveDate) -> NaiveDateTime {
        d.and_hms_opt(9, 0, 0).unwrap()
    }

    fn session(id: i64, day: &str) -> Session {
        let day = date(day);
        Session {
            id,
            session_date: day,
            started_at: timestamp(day),
            completed_at: None,
            total_volume: 0.0,
            notes: None,
            created_at: timestamp(day),
            updated_at: timestamp(day),
        }
    }

    fn set(id: i64, session_id: i64, type_id: &str, value: f64) -> SessionSet {
        let day = date("2025-06-01");
        SessionSet {
            id,
            session_id,
            ibadah_type_id: type_id.to_string(),
            value,
            duration_seconds: None,
            notes: None,
            set_order: 0,
            logged_at: timestamp(day),
            created_at: timestamp(day),
            updated_at: timestamp(day),
        }
    }

    fn ibadah(id: &str, weight: f64) -> IbadahType {
        let day = date("2025-01-01");
        IbadahType {
            id: id.to_string(),
            name: id.to_string(),
            unit: IbadahUnit::Count,
            weight,
            is_default: false,
            is_archived: false,
            sort_order: 0,
            created_at: timestamp(day),
            updated_at: timestamp(day),
        }
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let sessions = vec![session(1, "2025-06-15"), session(2, "2025-06-14"), session(3, "2025-06-13")];
        // 2025-06-12 has no session
        assert_eq!(calculate_streak(&sessions, date("2025-06-15")), 3);
    }

    #[test]
    fn test_streak_breaks_when_today_is_missing() {
        let sessions = vec![session(1, "2025-06-14"), session(2, "2025-06-13")];
        assert_eq!(calculate_streak(&sessions, date("2025-06-15")), 0);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(calculate_streak(&[], date("2025-06-15")), 0);
    }

    #[test]
    fn test_ibadah_streak_grants_today_a_grace_day() {
        let sessions = vec![session(1, "2025-06-15"), session(2, "2025-06-14"), session(3, "2025-06-13")];
        let sets = vec![set(1, 2, "quran", 5.0), set(2, 3, "quran", 5.0)];

        // Nothing logged today, the run from yesterday still stands
        assert_eq!(ibadah_streak(&sessions, &sets, "quran", date("2025-06-15")), 2);
    }

    #[test]
    fn test_ibadah_streak_breaks_on_earlier_miss() {
        let sessions = vec![session(1, "2025-06-15"), session(2, "2025-06-13")];
        let sets = vec![set(1, 2, "quran", 5.0)];

        // Today empty (grace), yesterday missing entirely: streak is over
        assert_eq!(ibadah_streak(&sessions, &sets, "quran", date("2025-06-15")), 0);
    }

    #[test]
    fn test_ibadah_week_marks_days() {
        let sessions = vec![session(1, "2025-06-15"), session(2, "2025-06-14")];
        let sets = vec![set(1, 2, "quran", 5.0)];

        let week = ibadah_week(&sessions, &sets, "quran", date("2025-06-15"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].0, date("2025-06-09"));
        assert_eq!(week[5], (date("2025-06-14"), DayMark::Completed));
        assert_eq!(week[6], (date("2025-06-15"), DayMark::Today));
        assert_eq!(week[0].1, DayMark::Missed);
    }

    #[test]
    fn test_daily_stats_weights_volume_and_filters_breakdown() {
        let s = session(1, "2025-06-15");
        let sets = vec![set(1, 1, "quran", 5.0), set(2, 1, "dhikr", 100.0)];
        let types = vec![ibadah("quran", 6.0), ibadah("dhikr", 0.1), ibadah("dua", 2.0)];

        let stats = calculate_daily_stats(&s, &sets, &types);
        assert_eq!(stats.set_count, 2);
        assert!((stats.total_volume - 40.0).abs() < 1e-9);

        // dua has no sets, so it does not appear
        assert_eq!(stats.breakdown.len(), 2);
        let quran = stats.breakdown.iter().find(|b| b.ibadah_type_id == "quran").unwrap();
        assert_eq!(quran.total_value, 5.0);
        assert_eq!(quran.set_count, 1);
    }

    #[test]
    fn test_weekly_stats_active_day_average() {
        // Week of Mon 2025-06-09 .. Sun 2025-06-15, sessions on two days
        let sessions = vec![session(1, "2025-06-10"), session(2, "2025-06-12")];
        let sets = vec![set(1, 1, "quran", 10.0), set(2, 2, "quran", 20.0)];
        let types = vec![ibadah("quran", 1.0)];

        let stats = calculate_weekly_stats(&sessions, &sets, &types, date("2025-06-15"));
        assert_eq!(stats.week_start, date("2025-06-09"));
        assert_eq!(stats.week_end, date("2025-06-15"));
        assert_eq!(stats.daily_stats.len(), 7);
        assert_eq!(stats.active_days, 2);
        assert!((stats.total_volume - 30.0).abs() < 1e-9);
        assert!((stats.average_daily_volume - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_stats_empty_week_has_zero_average() {
        let stats = calculate_weekly_stats(&[], &[], &[], date("2025-06-15"));
        assert_eq!(stats.active_days, 0);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.average_daily_volume, 0.0);
        assert!(stats.daily_stats.iter().all(|d| d.set_count == 0));
    }

    #[test]
    fn test_personal_records_daily_and_single_set() {
        let sessions = vec![session(1, "2025-06-01"), session(2, "2025-06-02")];
        let sets = vec![
            set(1, 1, "quran", 5.0),
            set(2, 1, "quran", 3.0),
            set(3, 2, "quran", 4.0),
        ];

        let records = find_personal_records(&sessions, &sets);

        let daily = records
            .iter()
            .find(|r| r.record_type == RecordType::DailyVolume && r.ibadah_type_id == "quran")
            .unwrap();
        assert_eq!(daily.value, 8.0);
        assert_eq!(daily.achieved_date, date("2025-06-01"));

        let single = records
            .iter()
            .find(|r| r.record_type == RecordType::SingleSet && r.ibadah_type_id == "quran")
            .unwrap();
        assert_eq!(single.value, 5.0);
        assert_eq!(single.achieved_date, date("2025-06-01"));
    }

    #[test]
    fn test_personal_record_higher_day_takes_over() {
        let sessions = vec![session(1, "2025-06-01"), session(2, "2025-06-02")];
        let sets = vec![set(1, 1, "quran", 8.0), set(2, 2, "quran", 12.0)];

        let records = find_personal_records(&sessions, &sets);
        let daily = records
            .iter()
            .find(|r| r.record_type == RecordType::DailyVolume)
            .unwrap();
        assert_eq!(daily.value, 12.0);
        assert_eq!(daily.achieved_date, date("2025-06-02"));
    }

    #[test]
    fn test_personal_record_tie_keeps_earliest_date() {
        let sessions = vec![session(1, "2025-06-01"), session(2, "2025-06-02")];
        let sets = vec![set(1, 1, "quran", 8.0), set(2, 2, "quran", 8.0)];

        let records = find_personal_records(&sessions, &sets);
        let daily = records
            .iter()
            .find(|r| r.record_type == RecordType::DailyVolume)
            .unwrap();
        assert_eq!(daily.achieved_date, date("2025-06-01"));
    }

    #[test]
    fn test_breakdown_percentages_and_order() {
        let sets = vec![set(1, 1, "quran", 10.0), set(2, 1, "dhikr", 100.0)];
        let types = vec![ibadah("quran", 6.0), ibadah("dhikr", 0.1), ibadah("dua", 2.0)];

        let breakdown = ibadah_breakdown(&sets, &types);
        assert_eq!(breakdown.len(), 2);

        // quran 60 weighted, dhikr 10 weighted: descending order
        assert_eq!(breakdown[0].ibadah_type_id, "quran");
        assert!((breakdown[0].weighted_value - 60.0).abs() < 1e-9);
        assert!((breakdown[0].percentage - 60.0 / 70.0 * 100.0).abs() < 1e-9);
        assert!((breakdown[1].percentage - 10.0 / 70.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_volume_over_recent_sessions() {
        let sessions = vec![session(1, "2025-06-15"), session(2, "2025-06-14"), session(3, "2025-06-01")];
        let sets = vec![set(1, 1, "quran", 10.0), set(2, 2, "quran", 20.0), set(3, 3, "quran", 90.0)];

        // Only the two most recent sessions fall into the window
        assert!((average_volume(&sessions, &sets, 2) - 15.0).abs() < 1e-9);
        assert_eq!(average_volume(&[], &sets, 7), 0.0);
    }

    #[test]
    fn test_week_bounds_monday_start() {
        // 2025-06-11 is a Wednesday
        let (start, end) = week_bounds(date("2025-06-11"));
        assert_eq!(start, date("2025-06-09"));
        assert_eq!(end, date("2025-06-15"));

        // A Monday is its own week start
        let (start, _) = week_bounds(date("2025-06-09"));
        assert_eq!(start, date("2025-06-09"));
    }
}
