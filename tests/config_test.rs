// tests/config_test.rs
use release_manager::config::{load_config, Config, CONFIG_FILE_NAME};
use release_manager::domain::VersionBump;
use release_manager::ReleaseError;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/release-manager.toml");

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.release.tag_pattern, "v{version}");
    assert_eq!(config.release.branch, "HEAD");
    assert_eq!(config.release.release_as, None);
    assert_eq!(config.files.tool_name, "release-manager");
    assert!(config.files.version_files.is_empty());
    assert!(config.files.template_files.is_empty());
}

#[test]
fn test_load_from_fixture() {
    let config = load_config(Some(FIXTURE)).unwrap();

    assert_eq!(config.release.tag_pattern, "release-{version}");
    assert_eq!(config.release.branch, "main");
    assert_eq!(config.release.release_as, Some(VersionBump::Minor));
    assert_eq!(config.files.tool_name, "my-app");
    assert_eq!(config.files.version_files, vec!["src/version.go".to_string()]);
    assert_eq!(config.files.template_files.len(), 2);
    assert!(config
        .conventional_commits
        .minor_types
        .contains(&"feature".to_string()));
    assert_eq!(
        config.conventional_commits.excluded_scopes,
        vec!["internal".to_string()]
    );
    // Keys absent from the file keep their defaults
    assert!(config
        .conventional_commits
        .excluded_types
        .contains(&"chore".to_string()));
}

#[test]
fn test_default_values() {
    let config = Config::default();
    let commits = &config.conventional_commits;
    assert!(commits.minor_types.contains(&"feat".to_string()));
    assert!(commits.patch_types.contains(&"fix".to_string()));
    assert!(commits.listed_types.contains(&"docs".to_string()));
    assert!(commits.excluded_types.contains(&"chore".to_string()));
    assert!(commits.excluded_scopes.contains(&"no-release".to_string()));
    assert!(commits
        .breaking_change_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
}

#[test]
fn test_invalid_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[files]\ntool_name = \"bad name\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(ReleaseError::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = load_config(Some("/definitely/not/here/release-manager.toml"));
    assert!(matches!(result, Err(ReleaseError::Io(_))));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[release]\ntag_pattern = \"app-v{version}\"\n",
    )
    .unwrap();

    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(previous).unwrap();

    assert_eq!(result.unwrap().release.tag_pattern, "app-v{version}");
}
