/// Returns the fence language tag for `path`, or an empty string when the
/// extension is unknown or missing.
pub fn get_language(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let lower_name = file_name.to_lowercase();

    match lower_name.as_str() {
        "makefile" | "gnumakefile" => return "makefile",
        "dockerfile" | "containerfile" => return "dockerfile",
        "cmakelists.txt" => return "cmake",
        "jenkinsfile" => return "groovy",
        _ => {}
    }

    match lower_name.rfind('.') {
        Some(dot) if dot + 1 < lower_name.len() => language_for_extension(&lower_name[dot + 1..]),
        _ => "",
    }
}

fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        // JavaScript and TypeScript
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" | "mts" | "cts" => "typescript",

        // Systems and general purpose
        "py" => "python",
        "rb" => "ruby",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "rs" => "rust",
        "scala" => "scala",
        "zig" => "zig",
        "nim" => "nim",

        // Shells
        "sh" | "bash" | "zsh" | "fish" => "bash",

        // Config and data
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "json" => "json",
        "xml" => "xml",
        "sql" => "sql",
        "graphql" | "gql" => "graphql",
        "proto" => "protobuf",
        "nix" => "nix",

        // Web
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "vue" => "vue",
        "svelte" => "svelte",
        "astro" => "astro",

        // Docs
        "md" | "mdx" => "markdown",

        // Build tooling
        "dockerfile" => "dockerfile",
        "makefile" => "makefile",
        "cmake" => "cmake",
        "gradle" => "gradle",

        // Scientific and functional
        "r" => "r",
        "m" => "matlab",
        "jl" => "julia",
        "lua" => "lua",
        "pl" => "perl",
        "clj" => "clojure",
        "ex" | "exs" => "elixir",
        "erl" | "hrl" => "erlang",
        "ml" => "ocaml",
        "fs" | "fsx" => "fsharp",
        "sol" => "solidity",

        _ => "",
    }
}
