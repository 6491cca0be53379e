use eyecamp_app::config::{self, AppConfig};
use eyecamp_app::logging::LogFormat;
use eyecamp_intake::draft::DraftSlot;
use eyecamp_intake::engine::IntakeMode;

#[test]
fn pre_versioned_config_keeps_the_shared_draft_slot() {
    let json = r#"{ "data_dir": "/srv/eyecamp", "intake_mode": "tabbed" }"#;
    let config = config::parse_config(json).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.draft_slot, DraftSlot::Shared);
    assert_eq!(config.intake_mode, IntakeMode::Tabbed);
    assert_eq!(config.data_dir, std::path::PathBuf::from("/srv/eyecamp"));
}

#[test]
fn current_config_defaults_to_per_record_drafts() {
    let json = r#"{ "config_version": 1, "data_dir": "/srv/eyecamp" }"#;
    let config = config::parse_config(json).unwrap();

    assert_eq!(config.draft_slot, DraftSlot::PerRecord);
    assert_eq!(config.intake_mode, IntakeMode::Wizard);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.sheets_api_base, "https://sheets.googleapis.com/v4");
}

#[test]
fn newer_config_is_rejected() {
    let err = config::parse_config(r#"{ "config_version": 7 }"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(config::parse_config("[1, 2, 3]").is_err());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eyecamp").join("config.json");
    let config = AppConfig {
        config_version: 0,
        data_dir: dir.path().join("data"),
        draft_slot: DraftSlot::Shared,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    config::save_config_to(&path, &config).unwrap();
    let loaded = config::load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.draft_slot, DraftSlot::Shared);
    assert_eq!(loaded.log_format, LogFormat::Json);
    assert_eq!(loaded.data_dir, config.data_dir);
    assert!(!path.with_extension("json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load_config_from(&dir.path().join("config.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
