#[cfg(test)]
mod tests {
    use ajr::db::sessions::Session;
    use ajr::libs::burnout::{deload_recommendation, detect_burnout, is_recovery_period_active, Severity};
    use ajr::libs::set::SessionSet;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn timestamp(d: NaiveDate) -> NaiveDateTime {
        d.and_hms_opt(9, 0, 0).unwrap()
    }

    fn session(id: i64, day: NaiveDate) -> Session {
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

    fn set(id: i64, session_id: i64, value: f64) -> SessionSet {
        let day = date("2025-06-01");
        SessionSet {
            id,
            session_id,
            ibadah_type_id: "quran".to_string(),
            value,
            duration_seconds: None,
            notes: None,
            set_order: 0,
            logged_at: timestamp(day),
            created_at: timestamp(day),
            updated_at: timestamp(day),
        }
    }

    /// Builds a current week (days 0..=6 back) and a previous week (days
    /// 7..=13 back) with the given per-day volumes.
    fn two_weeks(today: NaiveDate, current: &[f64], previous: &[f64]) -> (Vec<Session>, Vec<SessionSet>) {
        let mut sessions = Vec::new();
        let mut sets = Vec::new();
        let mut next_id = 1;

        for (i, value) in current.iter().enumerate() {
            sessions.push(session(next_id, today - Duration::days(i as i64)));
            sets.push(set(next_id, next_id, *value));
            next_id += 1;
        }
        for (i, value) in previous.iter().enumerate() {
            sessions.push(session(next_id, today - Duration::days(7 + i as i64)));
            sets.push(set(next_id, next_id, *value));
            next_id += 1;
        }

        (sessions, sets)
    }

    #[test]
    fn test_mild_burnout_at_ratio_point_six() {
        let today = date("2025-06-15");
        // Previous week 100 over 5 days, current week 60 over 4 days
        let (sessions, sets) = two_weeks(today, &[15.0, 15.0, 15.0, 15.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(warning.detected);
        assert_eq!(warning.severity, Severity::Mild);
        assert_eq!(warning.suggested_deload_percentage, 10);
        assert!(!warning.message.is_empty());
    }

    #[test]
    fn test_moderate_burnout_at_ratio_point_four() {
        let today = date("2025-06-15");
        let (sessions, sets) = two_weeks(today, &[10.0, 15.0, 15.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(warning.detected);
        assert_eq!(warning.severity, Severity::Moderate);
        assert_eq!(warning.suggested_deload_percentage, 25);
    }

    #[test]
    fn test_severe_burnout_below_ratio_point_three() {
        let today = date("2025-06-15");
        let (sessions, sets) = two_weeks(today, &[5.0, 5.0, 5.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(warning.detected);
        assert_eq!(warning.severity, Severity::Severe);
        assert_eq!(warning.suggested_deload_percentage, 40);
    }

    #[test]
    fn test_not_detected_when_ratio_is_healthy() {
        let today = date("2025-06-15");
        let (sessions, sets) = two_weeks(today, &[20.0, 20.0, 30.0], &[20.0, 20.0, 30.0, 15.0, 15.0]);

        // 70 / 100 is exactly the threshold, still healthy
        let warning = detect_burnout(&sessions, &sets, today);
        assert!(!warning.detected);
        assert_eq!(warning.suggested_deload_percentage, 0);
    }

    #[test]
    fn test_not_detected_with_sparse_previous_week() {
        let today = date("2025-06-15");
        // Previous week has only one active day, whatever its volume
        let (sessions, sets) = two_weeks(today, &[5.0, 5.0, 5.0, 5.0], &[100.0]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(!warning.detected);
    }

    #[test]
    fn test_not_detected_with_sparse_current_week() {
        let today = date("2025-06-15");
        let (sessions, sets) = two_weeks(today, &[5.0, 5.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(!warning.detected);
    }

    #[test]
    fn test_not_detected_with_empty_previous_week() {
        let today = date("2025-06-15");
        let (sessions, sets) = two_weeks(today, &[5.0, 5.0, 5.0], &[]);

        let warning = detect_burnout(&sessions, &sets, today);
        assert!(!warning.detected);
    }

    #[test]
    fn test_deload_recommendation_rounds_to_one_decimal() {
        assert_eq!(deload_recommendation(10.0, 25), 7.5);
        assert_eq!(deload_recommendation(7.0, 10), 6.3);
        assert_eq!(deload_recommendation(0.0, 40), 0.0);
    }

    #[test]
    fn test_recovery_period_needs_more_than_mild() {
        let today = date("2025-06-15");

        let (sessions, sets) = two_weeks(today, &[15.0, 15.0, 15.0, 15.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);
        assert!(!is_recovery_period_active(&sessions, &sets, today));

        let (sessions, sets) = two_weeks(today, &[10.0, 15.0, 15.0], &[20.0, 20.0, 20.0, 20.0, 20.0]);
        assert!(is_recovery_period_active(&sessions, &sets, today));
    }
}
