#[cfg(test)]
mod tests {
    use ajr::libs::config::Config;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_without_file_returns_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.minimum_viable_days.is_empty());
        assert!(config.minimum_viable_day("quran").is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_roundtrip(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.set_minimum_viable_day("quran", 2.0);
        config.set_minimum_viable_day("dhikr", 33.0);
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.minimum_viable_day("quran"), Some(2.0));
        assert_eq!(loaded.minimum_viable_day("dhikr"), Some(33.0));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_set_minimum_replaces_existing_target(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.set_minimum_viable_day("quran", 2.0);
        config.set_minimum_viable_day("quran", 5.0);

        assert_eq!(config.minimum_viable_days.len(), 1);
        assert_eq!(config.minimum_viable_day("quran"), Some(5.0));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_remove_minimum_viable_day(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.set_minimum_viable_day("quran", 2.0);
        config.remove_minimum_viable_day("quran");

        assert!(config.minimum_viable_day("quran").is_none());
    }
}
