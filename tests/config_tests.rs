use fullsend::config::{
    load_config_from, megabytes_to_bytes, read_config_file, save_config_to, Config, OutputFormat,
    PartialConfig, CONFIG_FILE_NAME, DEFAULT_MAX_FILE_SIZE,
};
use std::str::FromStr;
use tempfile::tempdir;
use tokio::fs;
use tracing_test::traced_test;

#[tokio::test]
async fn test_defaults_when_no_files_exist() {
    let dir = tempdir().unwrap();
    let config = load_config_from(None, dir.path(), PartialConfig::default()).await;

    assert_eq!(config, Config::default());
    assert!(config.use_git_ignore);
    assert_eq!(config.format, OutputFormat::Markdown);
    assert!(!config.show_file_tree);
    assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    assert!(!config.verbose);
}

#[tokio::test]
async fn test_layer_precedence() {
    let home = tempdir().unwrap();
    let project = tempdir().unwrap();
    let home_file = home.path().join(CONFIG_FILE_NAME);

    fs::write(
        &home_file,
        r#"{"format": "xml", "showFileTree": true, "maxFileSize": 100}"#,
    )
    .await
    .unwrap();
    fs::write(
        project.path().join(CONFIG_FILE_NAME),
        r#"{"showFileTree": false, "useGitIgnore": false}"#,
    )
    .await
    .unwrap();

    let overrides = PartialConfig {
        max_file_size: Some(42),
        ..PartialConfig::default()
    };
    let config = load_config_from(Some(&home_file), project.path(), overrides).await;

    assert_eq!(config.format, OutputFormat::Xml, "home value survives");
    assert!(!config.show_file_tree, "project beats home");
    assert!(!config.use_git_ignore);
    assert_eq!(config.max_file_size, 42, "command line beats both files");
}

#[tokio::test]
#[traced_test]
async fn test_invalid_json_is_skipped_with_warning() {
    let project = tempdir().unwrap();
    fs::write(project.path().join(CONFIG_FILE_NAME), "{ not json")
        .await
        .unwrap();

    let config = load_config_from(None, project.path(), PartialConfig::default()).await;
    assert_eq!(config, Config::default());
    assert!(logs_contain("Invalid config file"));
}

#[tokio::test]
async fn test_wrongly_typed_field_rejects_the_whole_file() {
    let home = tempdir().unwrap();
    let project = tempdir().unwrap();
    let home_file = home.path().join(CONFIG_FILE_NAME);

    fs::write(&home_file, r#"{"format": "xml"}"#).await.unwrap();
    fs::write(
        project.path().join(CONFIG_FILE_NAME),
        r#"{"format": "markdown", "maxFileSize": -5}"#,
    )
    .await
    .unwrap();

    let config = load_config_from(Some(&home_file), project.path(), PartialConfig::default()).await;
    assert_eq!(config.format, OutputFormat::Xml);
    assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
}

#[tokio::test]
async fn test_unknown_format_rejects_the_file() {
    let project = tempdir().unwrap();
    fs::write(project.path().join(CONFIG_FILE_NAME), r#"{"format": "html"}"#)
        .await
        .unwrap();

    assert!(read_config_file(&project.path().join(CONFIG_FILE_NAME))
        .await
        .is_none());
}

#[tokio::test]
async fn test_unknown_keys_are_ignored() {
    let project = tempdir().unwrap();
    fs::write(
        project.path().join(CONFIG_FILE_NAME),
        r#"{"verbose": true, "somethingElse": [1, 2, 3]}"#,
    )
    .await
    .unwrap();

    let config = load_config_from(None, project.path(), PartialConfig::default()).await;
    assert!(config.verbose);
}

#[tokio::test]
async fn test_save_then_read_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let partial = PartialConfig {
        format: Some(OutputFormat::Xml),
        add_xml_output_instruction: Some(true),
        ..PartialConfig::default()
    };

    save_config_to(&path, &partial).await.unwrap();
    let saved = fs::read_to_string(&path).await.unwrap();
    assert!(saved.contains("\"addXmlOutputInstruction\": true"));
    assert!(!saved.contains("verbose"), "unset fields are not written");

    assert_eq!(read_config_file(&path).await, Some(partial));
}

#[test]
fn test_merge_prefers_later_values() {
    let base = PartialConfig {
        verbose: Some(true),
        format: Some(OutputFormat::Xml),
        ..PartialConfig::default()
    };
    let later = PartialConfig {
        format: Some(OutputFormat::Markdown),
        ..PartialConfig::default()
    };

    let merged = base.merge(later);
    assert_eq!(merged.verbose, Some(true));
    assert_eq!(merged.format, Some(OutputFormat::Markdown));
}

#[test]
fn test_output_format_parsing() {
    assert_eq!(OutputFormat::from_str("xml").unwrap(), OutputFormat::Xml);
    assert_eq!(OutputFormat::from_str("Markdown").unwrap(), OutputFormat::Markdown);
    assert_eq!(OutputFormat::from_str("md").unwrap(), OutputFormat::Markdown);
    assert!(OutputFormat::from_str("html").is_err());
    assert_eq!(OutputFormat::Xml.to_string(), "xml");
}

#[test]
fn test_megabytes_to_bytes() {
    assert_eq!(megabytes_to_bytes(0), 0);
    assert_eq!(megabytes_to_bytes(10), DEFAULT_MAX_FILE_SIZE);
    assert_eq!(megabytes_to_bytes(u64::MAX), u64::MAX);
}

#[test]
fn test_max_file_size_accepts_any_non_negative_number() {
    let whole = PartialConfig::from_json(r#"{"maxFileSize": 1048576.0}"#).unwrap();
    assert_eq!(whole.max_file_size, Some(1_048_576));

    let fractional = PartialConfig::from_json(r#"{"maxFileSize": 10.7}"#).unwrap();
    assert_eq!(fractional.max_file_size, Some(10));

    let integer = PartialConfig::from_json(r#"{"maxFileSize": 2048}"#).unwrap();
    assert_eq!(integer.max_file_size, Some(2048));

    let absent = PartialConfig::from_json("{}").unwrap();
    assert_eq!(absent.max_file_size, None);

    assert!(PartialConfig::from_json(r#"{"maxFileSize": -1}"#).is_err());
    assert!(PartialConfig::from_json(r#"{"maxFileSize": "big"}"#).is_err());
}
