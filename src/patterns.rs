use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, trace};

pub const GIT_IGNORE_FILE: &str = ".gitignore";
pub const FULLSEND_IGNORE_FILE: &str = ".fullsendignore";

pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Dependencies
    "node_modules",
    "vendor",
    "bower_components",
    // Build outputs
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    "target",
    "coverage",
    // Caches
    ".cache",
    ".parcel-cache",
    ".next",
    ".nuxt",
    ".turbo",
    "__pycache__",
    "*.pyc",
    // Logs and locks
    "*.log",
    "*.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
    // Environment and secrets
    ".env",
    ".env.*",
    // IDE and OS
    ".DS_Store",
    "Thumbs.db",
    ".idea",
    ".vscode",
    "*.swp",
    "*.swo",
    // Binaries and compiled objects
    "*.dll",
    "*.exe",
    "*.pdb",
    "*.so",
    "*.dylib",
    "*.class",
    "*.jar",
    "*.war",
    "*.o",
    "*.a",
    // Images
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.ico",
    "*.svg",
    "*.webp",
    "*.bmp",
    // Fonts
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.eot",
    "*.otf",
    // Archives
    "*.zip",
    "*.tar",
    "*.gz",
    "*.rar",
    "*.7z",
    // Media
    "*.mp3",
    "*.mp4",
    "*.wav",
    "*.avi",
    "*.mov",
    "*.webm",
    // Documents
    "*.pdf",
    "*.doc",
    "*.docx",
    "*.xls",
    "*.xlsx",
    // Databases
    "*.sqlite",
    "*.db",
    // Source maps and minified bundles
    "*.map",
    "*.min.js",
    "*.min.css",
    // Ignore files themselves
    ".gitignore",
    ".fullsendignore",
];

/// Ordered ignore patterns for one project root.
///
/// Sources are appended in this order: built-in defaults, `.gitignore` (when
/// enabled), `.fullsendignore`. The matcher treats them as one rule set, so a
/// later negation can re-include something an earlier source excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
}

impl IgnorePatterns {
    pub fn new(patterns: Vec<String>) -> Self {
        IgnorePatterns { patterns }
    }

    pub fn defaults() -> Self {
        IgnorePatterns::new(DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect())
    }

    /// Resolves the full pattern list for `project_root`.
    pub async fn resolve(project_root: &Path, use_git_ignore: bool) -> Self {
        let mut resolved = IgnorePatterns::defaults();

        if use_git_ignore {
            let git_patterns = read_ignore_file(&project_root.join(GIT_IGNORE_FILE)).await;
            debug!("Loaded {} patterns from {}", git_patterns.len(), GIT_IGNORE_FILE);
            resolved.extend(git_patterns);
        }

        let tool_patterns = read_ignore_file(&project_root.join(FULLSEND_IGNORE_FILE)).await;
        debug!(
            "Loaded {} patterns from {}",
            tool_patterns.len(),
            FULLSEND_IGNORE_FILE
        );
        resolved.extend(tool_patterns);

        trace!("Resolved ignore patterns: {:?}", resolved.patterns);
        resolved
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, patterns: I) {
        self.patterns.extend(patterns);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.patterns
    }
}

/// Splits ignore-file content into patterns, dropping blank lines and `#` comments.
pub fn extract_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A missing or unreadable file contributes no patterns.
async fn read_ignore_file(path: &Path) -> Vec<String> {
    match async_fs::read_to_string(path).await {
        Ok(content) => extract_patterns(&content),
        Err(e) => {
            debug!("Skipping ignore file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
