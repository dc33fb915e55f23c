#[cfg(test)]
mod tests {
    use ajr::libs::export::{read_backup, restore_backup, Exporter, ExportFormat, EXPORT_VERSION};
    use ajr::libs::session::SessionService;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct ExportTestContext {
        _guard: MutexGuard<'static, ()>,
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ExportTestContext {
                _guard: guard,
                temp_dir,
            }
        }
    }

    fn seed_data() -> i64 {
        let mut service = SessionService::new().unwrap();
        service.types.ensure_defaults().unwrap();
        let session = service.start_session().unwrap();
        service.add_set(session.id, "quran", 5.0, None, Some("after fajr")).unwrap();
        service.add_set(session.id, "dhikr", 100.0, None, None).unwrap();
        session.id
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export_roundtrip(ctx: &mut ExportTestContext) {
        let session_id = seed_data();

        let output = ctx.temp_dir.path().join("backup.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(output.clone()));
        let path = exporter.export().unwrap();
        assert_eq!(path, output);

        let data = read_backup(&output).unwrap();
        assert_eq!(data.version, EXPORT_VERSION);
        assert_eq!(data.sessions.len(), 1);
        assert_eq!(data.sets.len(), 2);
        assert!(data.ibadah_types.iter().any(|t| t.id == "quran"));

        // Wipe a session, then restore the backup and check it came back
        let mut service = SessionService::new().unwrap();
        service.delete_session(session_id).unwrap();
        assert!(service.sessions.fetch_all().unwrap().is_empty());

        let (types, sessions, sets) = restore_backup(&data).unwrap();
        assert_eq!(sessions, 1);
        assert_eq!(sets, 2);
        assert!(types >= 6);

        let mut service = SessionService::new().unwrap();
        let restored = service.sessions.fetch_by_id(session_id).unwrap().unwrap();
        assert_eq!(service.sets.fetch_by_session(restored.id).unwrap().len(), 2);

        // Volume recomputation still works against restored rows
        let volume = service.recompute_volume(restored.id).unwrap();
        assert!((volume - (5.0 * 6.0 + 100.0 * 0.1)).abs() < 1e-9);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export_writes_one_row_per_set(ctx: &mut ExportTestContext) {
        seed_data();

        let output = ctx.temp_dir.path().join("sets.csv");
        Exporter::new(ExportFormat::Csv, Some(output.clone())).export().unwrap();

        let contents = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        // Header plus two set rows
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ibadah"));
        assert!(contents.contains("Quran"));
        assert!(contents.contains("after fajr"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_import_rejects_invalid_file(ctx: &mut ExportTestContext) {
        let bogus = ctx.temp_dir.path().join("bogus.json");
        std::fs::write(&bogus, "{\"not\": \"a backup\"}").unwrap();

        assert!(read_backup(&bogus).is_err());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_import_rejects_unsupported_version(ctx: &mut ExportTestContext) {
        seed_data();
        let output = ctx.temp_dir.path().join("backup.json");
        Exporter::new(ExportFormat::Json, Some(output.clone())).export().unwrap();

        let mut contents = std::fs::read_to_string(&output).unwrap();
        contents = contents.replace(&format!("\"{}\"", EXPORT_VERSION), "\"2.0.0\"");
        std::fs::write(&output, contents).unwrap();

        assert!(read_backup(&output).is_err());
    }
}
