#[cfg(test)]
mod tests {
    use ajr::libs::session::{SessionService, SESSION_EXPIRATION_HOURS};
    use ajr::libs::set::SetUpdate;
    use chrono::{Duration, Local};
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests share the process environment, so they run one at a time
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct SessionTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SessionTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_session_creates_open_session(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();

        assert_eq!(session.session_date, Local::now().date_naive());
        assert!(session.is_open());
        assert_eq!(session.total_volume, 0.0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_session_is_idempotent(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let first = service.start_session().unwrap();
        let second = service.start_session().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.sessions.fetch_all().unwrap().len(), 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_end_and_continue_session(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();

        let ended = service.end_session(session.id, Some("alhamdulillah")).unwrap().unwrap();
        assert!(!ended.is_open());
        assert_eq!(ended.notes.as_deref(), Some("alhamdulillah"));

        let reopened = service.continue_session(session.id).unwrap().unwrap();
        assert!(reopened.is_open());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_end_unknown_session_returns_none(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        assert!(service.end_session(9999, None).unwrap().is_none());
        assert!(service.continue_session(9999).unwrap().is_none());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_add_set_recomputes_weighted_volume(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        service.types.ensure_defaults().unwrap();
        let session = service.start_session().unwrap();

        // quran weight 6, dhikr weight 0.1
        service.add_set(session.id, "quran", 5.0, None, None).unwrap().unwrap();
        service.add_set(session.id, "dhikr", 100.0, None, None).unwrap().unwrap();

        let session = service.sessions.fetch_by_id(session.id).unwrap().unwrap();
        assert!((session.total_volume - (5.0 * 6.0 + 100.0 * 0.1)).abs() < 1e-9);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_unknown_type_defaults_to_weight_one(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();

        service.add_set(session.id, "adhkar", 1.0, None, None).unwrap().unwrap();

        let session = service.sessions.fetch_by_id(session.id).unwrap().unwrap();
        assert!((session.total_volume - 1.0).abs() < 1e-9);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_add_set_to_missing_session_inserts_nothing(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let result = service.add_set(4242, "quran", 5.0, None, None).unwrap();

        assert!(result.is_none());
        assert!(service.sets.fetch_all().unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_set_order_counts_up_and_keeps_gaps(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();

        let first = service.add_set(session.id, "quran", 1.0, None, None).unwrap().unwrap();
        let second = service.add_set(session.id, "quran", 2.0, None, None).unwrap().unwrap();
        assert_eq!(first.set_order, 0);
        assert_eq!(second.set_order, 1);

        // Deleting the first set must not renumber the second
        service.delete_set(first.id).unwrap();
        let third = service.add_set(session.id, "quran", 3.0, None, None).unwrap().unwrap();
        assert_eq!(third.set_order, 1);

        let remaining = service.sets.fetch_by_session(session.id).unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1].set_order, 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_update_and_delete_set_keep_volume_in_sync(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        service.types.ensure_defaults().unwrap();
        let session = service.start_session().unwrap();

        let set = service.add_set(session.id, "quran", 5.0, None, None).unwrap().unwrap();
        let updates = SetUpdate { value: Some(10.0), ..SetUpdate::default() };
        assert!(service.update_set(set.id, &updates).unwrap());

        let session_row = service.sessions.fetch_by_id(session.id).unwrap().unwrap();
        assert!((session_row.total_volume - 60.0).abs() < 1e-9);

        assert!(service.delete_set(set.id).unwrap());
        let session_row = service.sessions.fetch_by_id(session.id).unwrap().unwrap();
        assert_eq!(session_row.total_volume, 0.0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_mutating_unknown_set_is_noop(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let updates = SetUpdate { value: Some(1.0), ..SetUpdate::default() };

        assert!(!service.update_set(777, &updates).unwrap());
        assert!(!service.delete_set(777).unwrap());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_delete_session_cascades_to_sets(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();
        service.add_set(session.id, "quran", 5.0, None, None).unwrap();
        service.add_set(session.id, "dua", 10.0, None, None).unwrap();

        assert!(service.delete_session(session.id).unwrap());

        assert!(service.sessions.fetch_by_id(session.id).unwrap().is_none());
        assert!(service.sets.fetch_by_session(session.id).unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_stale_open_session_expires(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();

        let stale_start = Local::now().naive_local() - Duration::hours(SESSION_EXPIRATION_HOURS + 1);
        let stale = service
            .sessions
            .insert_start_at(stale_start.date(), stale_start)
            .unwrap();

        assert!(service.check_and_expire().unwrap());

        let stale = service.sessions.fetch_by_id(stale.id).unwrap().unwrap();
        assert!(!stale.is_open());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_fresh_open_session_is_untouched_by_expiry(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();

        assert!(!service.check_and_expire().unwrap());
        assert!(service.sessions.fetch_by_id(session.id).unwrap().unwrap().is_open());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_session_expires_stale_session_first(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();

        let stale_start = Local::now().naive_local() - Duration::hours(30);
        let stale = service
            .sessions
            .insert_start_at(stale_start.date(), stale_start)
            .unwrap();

        let today_session = service.start_session().unwrap();

        assert_ne!(stale.id, today_session.id);
        assert!(!service.sessions.fetch_by_id(stale.id).unwrap().unwrap().is_open());
        assert!(today_session.is_open());

        // The expired session is completed, not deleted
        assert_eq!(service.sessions.fetch_all().unwrap().len(), 2);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_get_or_create_today_reuses_completed_session(_ctx: &mut SessionTestContext) {
        let mut service = SessionService::new().unwrap();
        let session = service.start_session().unwrap();
        service.end_session(session.id, None).unwrap();

        let again = service.get_or_create_today().unwrap();
        assert_eq!(again.id, session.id);
        assert_eq!(service.sessions.fetch_all().unwrap().len(), 1);
    }
}
