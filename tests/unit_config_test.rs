use opaldb::config::StorageConfig;
use std::io::Write;

#[test]
fn test_default_values() {
    let config = StorageConfig::default();
    assert_eq!(config.max_key_size, 1024);
    assert_eq!(config.range_delete_threshold, 100_000);
    config.validate().unwrap();
}

#[test]
fn test_from_file_parses_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_key_size = 512").unwrap();
    writeln!(file, "range_delete_threshold = 10").unwrap();

    let config = StorageConfig::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.max_key_size, 512);
    assert_eq!(config.range_delete_threshold, 10);
}

#[test]
fn test_from_file_applies_defaults_for_missing_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_key_size = 256").unwrap();

    let config = StorageConfig::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.max_key_size, 256);
    assert_eq!(config.range_delete_threshold, 100_000);
}

#[test]
fn test_from_file_missing_file_fails() {
    assert!(StorageConfig::from_file("/nonexistent/opaldb.toml").is_err());
}

#[test]
fn test_validate_rejects_zero_values() {
    let config = StorageConfig {
        max_key_size: 0,
        ..StorageConfig::default()
    };
    assert!(config.validate().is_err());

    let config = StorageConfig {
        range_delete_threshold: 0,
        ..StorageConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_key_size = 0").unwrap();

    assert!(StorageConfig::from_file(file.path().to_str().unwrap()).is_err());
}
