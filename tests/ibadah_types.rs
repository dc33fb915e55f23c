#[cfg(test)]
mod tests {
    use ajr::db::ibadah_types::IbadahTypes;
    use ajr::libs::ibadah::{generate_id, IbadahType, IbadahUnit, IbadahUpdate, DEFAULT_IBADAH_TYPES};
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct IbadahTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for IbadahTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            IbadahTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_ensure_defaults_seeds_once(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();

        let added = types.ensure_defaults().unwrap();
        assert_eq!(added, DEFAULT_IBADAH_TYPES.len());

        // Second run finds everything in place
        assert_eq!(types.ensure_defaults().unwrap(), 0);
        assert_eq!(types.fetch_all().unwrap().len(), DEFAULT_IBADAH_TYPES.len());
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_defaults_carry_expected_weights(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        types.ensure_defaults().unwrap();

        let quran = types.fetch_by_id("quran").unwrap().unwrap();
        assert_eq!(quran.weight, 6.0);
        assert_eq!(quran.unit, IbadahUnit::Pages);
        assert!(quran.is_default);

        let fasting = types.fetch_by_id("fasting").unwrap().unwrap();
        assert_eq!(fasting.unit, IbadahUnit::Binary);
        assert_eq!(fasting.weight, 100.0);
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_ensure_defaults_heals_broken_weight(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        types.ensure_defaults().unwrap();

        // Simulate a row that lost its weight
        let updates = IbadahUpdate { weight: Some(0.0), ..IbadahUpdate::default() };
        types.update("dhikr", &updates).unwrap();

        types.ensure_defaults().unwrap();
        assert_eq!(types.fetch_by_id("dhikr").unwrap().unwrap().weight, 0.1);
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_add_and_update_custom_type(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        let custom = IbadahType::new("Tahajjud", IbadahUnit::Minutes, Some(5.0), 10);
        types.insert(&custom).unwrap();

        let fetched = types.fetch_by_id(&custom.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Tahajjud");
        assert_eq!(fetched.weight, 5.0);
        assert!(!fetched.is_default);

        let updates = IbadahUpdate {
            name: Some("Night prayer".to_string()),
            weight: Some(4.5),
            ..IbadahUpdate::default()
        };
        assert!(types.update(&custom.id, &updates).unwrap());
        let fetched = types.fetch_by_id(&custom.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Night prayer");
        assert_eq!(fetched.weight, 4.5);
        // Unit stays untouched when not part of the update
        assert_eq!(fetched.unit, IbadahUnit::Minutes);
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_update_unknown_id_reports_miss(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        let updates = IbadahUpdate { weight: Some(2.0), ..IbadahUpdate::default() };
        assert!(!types.update("missing", &updates).unwrap());
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_archive_hides_from_active_and_restore_brings_back(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        types.ensure_defaults().unwrap();

        assert!(types.set_archived("dua", true).unwrap());
        let active_ids: Vec<String> = types.fetch_active().unwrap().into_iter().map(|t| t.id).collect();
        assert!(!active_ids.contains(&"dua".to_string()));

        // Archived types stay in the full listing
        assert_eq!(types.fetch_all().unwrap().len(), DEFAULT_IBADAH_TYPES.len());

        assert!(types.set_archived("dua", false).unwrap());
        let active_ids: Vec<String> = types.fetch_active().unwrap().into_iter().map(|t| t.id).collect();
        assert!(active_ids.contains(&"dua".to_string()));
    }

    #[test_context(IbadahTestContext)]
    #[test]
    fn test_delete_removes_row(_ctx: &mut IbadahTestContext) {
        let mut types = IbadahTypes::new().unwrap();
        let custom = IbadahType::new("Itikaf", IbadahUnit::Minutes, None, 0);
        types.insert(&custom).unwrap();

        assert_eq!(types.delete(&custom.id).unwrap(), 1);
        assert!(types.fetch_by_id(&custom.id).unwrap().is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let first = generate_id();
        let second = generate_id();
        assert_ne!(first, second);
        assert!(first.contains('-'));
    }
}
