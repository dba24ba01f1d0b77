use fullsend::bundler::{bundle, BasicBundler, Bundler, FileStatus};
use fullsend::config::{Config, OutputFormat};
use fullsend::errors::BundleError;
use fullsend::output::{deliver, write_bundle, Destination};
use std::path::Path;
use tempfile::tempdir;
use tokio::fs;

async fn write_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(&path, content).await.unwrap();
}

async fn sample_project(root: &Path) {
    write_file(root, "src/index.ts", b"export {}").await;
    write_file(root, "node_modules/pkg.js", b"module.exports = 1;").await;
    write_file(root, ".gitignore", b"node_modules\n").await;
}

#[tokio::test]
async fn test_bundle_markdown_respects_gitignore() {
    let dir = tempdir().unwrap();
    sample_project(dir.path()).await;

    let result = bundle(dir.path(), Config::default()).await.unwrap();

    assert!(result.output.contains("src/index.ts:"));
    assert!(result.output.contains("```typescript"));
    assert!(result.output.contains("export {}"));
    assert!(!result.output.contains("pkg.js"));
    assert!(!result.output.contains("## File Structure"));
    assert_eq!(result.loaded_count(), 1);
    assert_eq!(result.loaded_size(), 9);
    assert!(result.metadata.total_tokens > 0);
    assert!(result.ignore_patterns.iter().any(|p| p == "node_modules"));
}

#[tokio::test]
async fn test_bundle_xml_with_tree() {
    let dir = tempdir().unwrap();
    sample_project(dir.path()).await;

    let config = Config {
        format: OutputFormat::Xml,
        show_file_tree: true,
        add_xml_output_instruction: true,
        ..Config::default()
    };
    let result = BasicBundler::new(config)
        .with_concurrency(2)
        .bundle(dir.path())
        .await
        .unwrap();

    assert!(result.output.starts_with("<codebase>\n<note>"));
    assert!(result.output.contains("<structure><![CDATA["));
    assert!(result.output.contains("node_modules/..."));
    assert!(result
        .output
        .contains("<file path=\"src/index.ts\"><![CDATA[export {}]]></file>"));
    assert!(result.output.ends_with("</codebase>"));
}

#[tokio::test]
async fn test_instruction_only_applies_to_xml() {
    let dir = tempdir().unwrap();
    sample_project(dir.path()).await;

    let config = Config {
        add_xml_output_instruction: true,
        ..Config::default()
    };
    let result = bundle(dir.path(), config).await.unwrap();
    assert!(!result.output.contains("<note>"));
}

#[tokio::test]
async fn test_empty_directory_is_an_empty_success() {
    let dir = tempdir().unwrap();

    let result = bundle(dir.path(), Config::default()).await.unwrap();
    assert!(result.is_empty());
    assert!(result.files.is_empty());
    assert_eq!(result.metadata.files_skipped, 0);
    assert_eq!(result.metadata.files_failed, 0);
}

#[tokio::test]
async fn test_missing_root_fails() {
    let dir = tempdir().unwrap();
    let result = bundle(&dir.path().join("nope"), Config::default()).await;
    assert!(matches!(result, Err(BundleError::RootNotFound(_))));
}

#[tokio::test]
async fn test_zero_max_size_skips_every_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.rs", b"fn a() {}").await;
    write_file(dir.path(), "b.rs", b"fn b() {}").await;

    let config = Config {
        max_file_size: 0,
        ..Config::default()
    };
    let result = bundle(dir.path(), config).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.metadata.files_skipped, 2);
    assert!(result
        .files
        .iter()
        .all(|f| f.status == FileStatus::Skipped));
}

#[tokio::test]
async fn test_records_list_loaded_then_skipped() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"text").await;
    write_file(dir.path(), "b.dat", b"bin\0ary").await;
    write_file(dir.path(), "c.txt", b"more").await;

    let result = bundle(dir.path(), Config::default()).await.unwrap();
    let statuses: Vec<(&str, FileStatus)> = result
        .files
        .iter()
        .map(|f| (f.path.as_str(), f.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("a.txt", FileStatus::Loaded),
            ("c.txt", FileStatus::Loaded),
            ("b.dat", FileStatus::Skipped),
        ]
    );
    assert_eq!(result.metadata.files_skipped, 1);
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_deliver_to_file() {
    let dir = tempdir().unwrap();
    sample_project(dir.path()).await;
    let result = bundle(dir.path(), Config::default()).await.unwrap();

    let target = dir.path().join("bundle.md");
    deliver(&result.output, &Destination::File(target.clone()))
        .await
        .unwrap();
    assert_eq!(fs::read_to_string(&target).await.unwrap(), result.output);
}

#[tokio::test]
async fn test_deliver_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing").join("bundle.md");

    let result = deliver("content", &Destination::File(target)).await;
    assert!(matches!(result, Err(BundleError::OutputError(_, _))));
}

#[tokio::test]
async fn test_stdout_bytes_match_file_bytes() {
    let dir = tempdir().unwrap();
    sample_project(dir.path()).await;
    let result = bundle(dir.path(), Config::default()).await.unwrap();

    let target = dir.path().join("bundle.md");
    deliver(&result.output, &Destination::File(target.clone()))
        .await
        .unwrap();

    let mut stdout_bytes = Vec::new();
    write_bundle(&mut stdout_bytes, &result.output).unwrap();
    assert_eq!(stdout_bytes, fs::read(&target).await.unwrap());
    assert!(!stdout_bytes.ends_with(b"\n"));
}
