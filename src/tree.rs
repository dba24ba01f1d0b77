use crate::scanner::ScanEntry;
use crate::utils::compare_names;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    /// Ignored directory whose contents were never scanned.
    FilteredDirectory,
}

impl NodeKind {
    fn is_directory(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::FilteredDirectory)
    }
}

/// Represents a node in a trie.
#[derive(Debug)]
pub struct TrieNode {
    pub children: HashMap<String, TrieNode>,
    pub kind: NodeKind,
}

impl TrieNode {
    pub fn new(kind: NodeKind) -> Self {
        TrieNode {
            children: HashMap::new(),
            kind,
        }
    }

    /// Counts every node below this one.
    pub fn count_descendants(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.count_descendants())
            .sum()
    }

    fn sorted_children(&self) -> Vec<(&String, &TrieNode)> {
        let mut children: Vec<_> = self.children.iter().collect();
        children.sort_by(|(name_a, node_a), (name_b, node_b)| {
            node_b
                .kind
                .is_directory()
                .cmp(&node_a.kind.is_directory())
                .then_with(|| compare_names(name_a, name_b))
        });
        children
    }
}

/// Prefix tree of posix-style relative paths.
#[derive(Debug)]
pub struct Trie {
    root: TrieNode,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(NodeKind::Directory),
        }
    }

    /// Inserts a path; missing parents are created as directories.
    pub fn insert(&mut self, path: &str, kind: NodeKind) {
        trace!("Inserting path into trie: {} ({:?})", path, kind);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current_node = &mut self.root;
        for segment in parents {
            current_node = current_node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| TrieNode::new(NodeKind::Directory));
            if current_node.kind == NodeKind::File {
                current_node.kind = NodeKind::Directory;
            }
        }

        let node = current_node
            .children
            .entry(last.to_string())
            .or_insert_with(|| TrieNode::new(kind));
        if node.children.is_empty() {
            node.kind = kind;
        }
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Renders the trie with box-drawing connectors, one entry per line.
    ///
    /// `limit` caps the number of entry lines across the whole tree; the rest
    /// collapse into a single `... (N more items)` line.
    pub fn render(&self, limit: Option<usize>) -> String {
        let mut state = RenderState {
            output: String::new(),
            rendered: 0,
            total: self.root.count_descendants(),
            limit,
            truncated: false,
        };
        render_node(&self.root, "", &mut state);
        state.output
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    pub limit: Option<usize>,
    /// Show filtered directories as `name/...` placeholders.
    pub show_filtered: bool,
}

/// Builds and renders the tree for a set of scan entries. The result does not
/// depend on the order of `entries`.
pub fn generate_tree(entries: &[ScanEntry], options: &TreeOptions) -> String {
    let mut trie = Trie::new();
    for entry in entries {
        let kind = match (entry.is_directory, entry.is_filtered) {
            (true, true) if options.show_filtered => NodeKind::FilteredDirectory,
            (_, true) => continue,
            (true, false) => NodeKind::Directory,
            (false, false) => NodeKind::File,
        };
        trie.insert(&entry.relative_path, kind);
    }
    trie.render(options.limit)
}

struct RenderState {
    output: String,
    rendered: usize,
    total: usize,
    limit: Option<usize>,
    truncated: bool,
}

fn render_node(node: &TrieNode, prefix: &str, state: &mut RenderState) {
    let children = node.sorted_children();
    let count = children.len();

    for (i, (name, child)) in children.into_iter().enumerate() {
        if state.truncated {
            return;
        }
        if let Some(limit) = state.limit {
            if state.rendered >= limit {
                let remaining = state.total - state.rendered;
                state
                    .output
                    .push_str(&format!("{}└── ... ({} more items)\n", prefix, remaining));
                state.truncated = true;
                return;
            }
        }

        let is_last = i == count - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let label = match child.kind {
            NodeKind::File => name.clone(),
            NodeKind::Directory => format!("{}/", name),
            NodeKind::FilteredDirectory => format!("{}/...", name),
        };
        state
            .output
            .push_str(&format!("{}{}{}\n", prefix, connector, label));
        state.rendered += 1;

        if child.kind == NodeKind::Directory {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_node(child, &child_prefix, state);
        }
    }
}
