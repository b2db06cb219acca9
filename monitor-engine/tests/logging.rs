//! Logger smoke test: the rotating file layer must land lines on disk.

use monitor_engine::common::logger;

#[test]
fn test_file_logging_writes_daily_log() {
    let dir = tempfile::tempdir().unwrap();
    logger::init_logger_with_file("info", true, Some(dir.path().to_str().unwrap())).unwrap();

    tracing::info!(docket = "11001-31-03-003-2020-00123-00", "sync smoke line");

    let app_dir = dir.path().join("app");
    let files: Vec<_> = std::fs::read_dir(&app_dir)
        .unwrap()
        .filter_map(Result::ok)
        .collect();
    assert_eq!(files.len(), 1);

    let content = std::fs::read_to_string(files[0].path()).unwrap();
    assert!(content.contains("sync smoke line"));
    assert!(content.contains("11001-31-03-003-2020-00123-00"));
}
