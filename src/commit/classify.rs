//! Heuristic commit classification from staged diff headers.
//!
//! Only file paths are inspected, never diff content. Headers are scanned in
//! order and the rules below are applied to each path:
//!
//! 1. Documentation (`docs/` directory or `.md` file) sets `docs` and stops
//!    the scan immediately.
//! 2. A source-code file sets `feat`; if its name follows a test naming
//!    convention the result becomes `test` and the scan stops.
//! 3. A dependency manifest or dotfile sets `chore` and the scan continues.
//!
//! So `docs` and `test` win on first match while `chore` and `feat` keep
//! overwriting each other as later headers arrive. That scan-order dependency
//! is kept as-is: `chore` followed by a source file reports `feat`, the reverse
//! order reports `chore`.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::git::status::unquote;

/// Conventional commit types the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Feat,
    Docs,
    Test,
    Chore,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Feat => "feat",
            SuggestionType::Docs => "docs",
            SuggestionType::Test => "test",
            SuggestionType::Chore => "chore",
        }
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "docs" => Ok(Self::Docs),
            "test" => Ok(Self::Test),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown suggestion type: {}", s)),
        }
    }
}

/// A proposed conventional commit header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub scope: String,
    pub description: String,
}

impl Default for Suggestion {
    fn default() -> Self {
        Self::new(SuggestionType::Feat, "update code")
    }
}

impl Suggestion {
    fn new(kind: SuggestionType, description: &str) -> Self {
        Self {
            kind,
            scope: String::new(),
            description: description.to_string(),
        }
    }

    /// `type(scope): description`, or `type: description` without a scope.
    pub fn message(&self) -> String {
        if self.scope.is_empty() {
            format!("{}: {}", self.kind, self.description)
        } else {
            format!("{}({}): {}", self.kind, self.scope, self.description)
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

const DIFF_HEADER: &str = "diff --git ";

const DOCS_DIR: &str = "docs/";

const SOURCE_EXTENSIONS: &[&str] = &[
    "go", "rs", "py", "js", "jsx", "ts", "tsx", "mjs", "java", "kt", "swift", "c", "h", "cc",
    "cpp", "hpp", "cs", "rb", "php", "scala", "ex", "exs", "zig", "lua", "dart",
];

const MANIFEST_FILES: &[&str] = &[
    "go.mod",
    "go.sum",
    "Cargo.toml",
    "Cargo.lock",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "requirements.txt",
    "pyproject.toml",
    "poetry.lock",
    "Pipfile",
    "Pipfile.lock",
    "Gemfile",
    "Gemfile.lock",
    "composer.json",
    "composer.lock",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "Makefile",
    "Dockerfile",
];

/// Classify a unified diff into a commit suggestion.
pub fn classify_diff(diff: &str) -> Suggestion {
    let mut suggestion = Suggestion::default();

    for path in diff.lines().filter_map(header_path) {
        let path = path.as_ref();
        if is_documentation(path) {
            return Suggestion::new(SuggestionType::Docs, "update documentation");
        }

        if is_source_code(path) {
            suggestion = Suggestion::new(SuggestionType::Feat, "implement feature");
            if is_test_file(path) {
                return Suggestion::new(SuggestionType::Test, "add tests");
            }
        }

        if is_manifest_or_dotfile(path) {
            suggestion = Suggestion::new(SuggestionType::Chore, "update dependencies/config");
        }
    }

    suggestion
}

/// Destination path of a `diff --git a/<old> b/<new>` header line.
///
/// Quoted headers (`"a/caf\303\251.md" "b/caf\303\251.md"`) are decoded.
fn header_path(line: &str) -> Option<Cow<'_, str>> {
    let rest = line.strip_prefix(DIFF_HEADER)?;
    if rest.ends_with('"') {
        if let Some(idx) = rest.rfind(" \"") {
            let decoded = unquote(&rest[idx + 1..]);
            let path = decoded.strip_prefix("b/").unwrap_or(decoded.as_str()).to_string();
            return Some(Cow::Owned(path));
        }
    }
    match rest.rfind(" b/") {
        Some(idx) => Some(Cow::Borrowed(&rest[idx + 3..])),
        // --no-prefix or custom prefixes
        None => rest.split_whitespace().last().map(Cow::Borrowed),
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(path: &str) -> Option<&str> {
    Path::new(file_name(path)).extension().and_then(|e| e.to_str())
}

fn is_documentation(path: &str) -> bool {
    path.starts_with(DOCS_DIR) || path.contains(&format!("/{DOCS_DIR}")) || path.ends_with(".md")
}

fn is_source_code(path: &str) -> bool {
    extension(path).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_test_file(path: &str) -> bool {
    let name = file_name(path);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    };
    stem.ends_with("_test")
        || stem.ends_with(".test")
        || stem.ends_with(".spec")
        || stem.starts_with("test_")
}

fn is_manifest_or_dotfile(path: &str) -> bool {
    let name = file_name(path);
    MANIFEST_FILES.contains(&name) || name.starts_with('.') || path.starts_with('.')
}
