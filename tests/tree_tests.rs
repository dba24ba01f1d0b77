use fullsend::scanner::ScanEntry;
use fullsend::tree::{generate_tree, NodeKind, Trie, TreeOptions};
use std::path::PathBuf;

fn file(path: &str) -> ScanEntry {
    ScanEntry::file(PathBuf::from(path), path, 100)
}

fn filtered_dir(path: &str) -> ScanEntry {
    ScanEntry::filtered_directory(PathBuf::from(path), path)
}

fn render(entries: &[ScanEntry]) -> String {
    generate_tree(entries, &TreeOptions::default())
}

#[test]
fn test_flat_tree() {
    let output = render(&[file("a.txt"), file("b.txt")]);
    assert_eq!(output, "├── a.txt\n└── b.txt\n");
}

#[test]
fn test_directories_sort_before_files() {
    let output = render(&[file("file.txt"), file("dir/nested.txt")]);
    assert_eq!(output, "├── dir/\n│   └── nested.txt\n└── file.txt\n");
}

#[test]
fn test_deep_nesting() {
    let output = render(&[file("src/components/ui/button.ts")]);
    assert_eq!(
        output,
        "└── src/\n    └── components/\n        └── ui/\n            └── button.ts\n"
    );
}

#[test]
fn test_empty_input_renders_nothing() {
    assert_eq!(render(&[]), "");
}

#[test]
fn test_limit_truncates_with_remaining_count() {
    let entries = [file("a.txt"), file("b.txt"), file("c.txt"), file("d.txt")];
    let output = generate_tree(
        &entries,
        &TreeOptions {
            limit: Some(2),
            show_filtered: false,
        },
    );

    assert_eq!(output, "├── a.txt\n├── b.txt\n└── ... (2 more items)\n");
    assert!(!output.contains("c.txt"));
}

#[test]
fn test_limit_counts_nested_items_across_the_whole_tree() {
    let entries = [
        file("a/one.txt"),
        file("a/two.txt"),
        file("b/three.txt"),
        file("z.txt"),
    ];
    let output = generate_tree(
        &entries,
        &TreeOptions {
            limit: Some(3),
            show_filtered: false,
        },
    );

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4, "3 entry lines plus one summary: {}", output);
    assert_eq!(lines[0], "├── a/");
    assert_eq!(lines[1], "│   ├── one.txt");
    assert_eq!(lines[2], "│   └── two.txt");
    // b/, b/three.txt and z.txt remain.
    assert_eq!(lines[3], "└── ... (3 more items)");
}

#[test]
fn test_limit_larger_than_tree_renders_everything() {
    let entries = [file("a.txt"), file("b.txt")];
    let output = generate_tree(
        &entries,
        &TreeOptions {
            limit: Some(10),
            show_filtered: false,
        },
    );
    assert!(!output.contains("more items"));
}

#[test]
fn test_filtered_directory_is_opaque_when_shown() {
    let entries = [file("src/main.rs"), filtered_dir("node_modules")];
    let output = generate_tree(
        &entries,
        &TreeOptions {
            limit: None,
            show_filtered: true,
        },
    );
    assert_eq!(output, "├── node_modules/...\n└── src/\n    └── main.rs\n");
}

#[test]
fn test_filtered_directory_is_omitted_by_default() {
    let entries = [file("src/main.rs"), filtered_dir("node_modules")];
    let output = render(&entries);
    assert!(!output.contains("node_modules"));
}

#[test]
fn test_rendering_is_independent_of_input_order() {
    let mut entries = vec![
        file("src/lib.rs"),
        file("README.md"),
        file("src/bin/tool.rs"),
        file("Cargo.toml"),
        file("docs/guide.md"),
        filtered_dir("target"),
    ];
    let options = TreeOptions {
        limit: None,
        show_filtered: true,
    };
    let expected = generate_tree(&entries, &options);

    entries.reverse();
    assert_eq!(generate_tree(&entries, &options), expected);
    entries.swap(0, 3);
    assert_eq!(generate_tree(&entries, &options), expected);
    assert_eq!(generate_tree(&entries, &options), expected);
}

#[test]
fn test_trie_counts_descendants() {
    let mut trie = Trie::new();
    trie.insert("a/b/c.txt", NodeKind::File);
    trie.insert("a/d.txt", NodeKind::File);
    assert_eq!(trie.get_root().count_descendants(), 4);
    assert!(!trie.is_empty());
}
