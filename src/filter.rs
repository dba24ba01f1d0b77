use crate::patterns::IgnorePatterns;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Gitignore-semantics predicate over paths relative to the scan root.
pub struct PathFilter {
    root: PathBuf,
    matcher: Gitignore,
}

impl PathFilter {
    pub fn new(root: &Path, patterns: &IgnorePatterns) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns.as_slice() {
            if let Err(e) = builder.add_line(None, pattern) {
                warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        let matcher = builder.build().unwrap_or_else(|e| {
            warn!("Failed to compile ignore patterns, nothing will be ignored: {}", e);
            Gitignore::empty()
        });
        debug!("Compiled {} ignore rules", matcher.num_ignores());

        PathFilter {
            root: root.to_path_buf(),
            matcher,
        }
    }

    /// Returns true when `relative_path` is excluded, either directly or because
    /// one of its parent directories is. A later negation only re-includes a
    /// path whose parents are not excluded.
    ///
    /// Candidates are joined onto the root before matching. The matcher strips
    /// its root as a byte prefix, so a bare relative path could lose part of its
    /// first component when it happens to start with the root's name.
    pub fn ignores<P: AsRef<Path>>(&self, relative_path: P, is_dir: bool) -> bool {
        let components: Vec<_> = relative_path.as_ref().components().collect();
        let mut current = self.root.clone();

        for (i, component) in components.iter().enumerate() {
            current.push(component);
            let is_last = i == components.len() - 1;
            if self
                .matcher
                .matched(&current, if is_last { is_dir } else { true })
                .is_ignore()
            {
                return true;
            }
        }
        false
    }
}
