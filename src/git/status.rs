//! Porcelain status parsing: branch header, status codes, and changed files.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Serialize;

use crate::error::GitError;

/// One symbol of a porcelain `XY` status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSymbol {
    Unmodified,
    Modified,
    TypeChanged,
    Added,
    Deleted,
    Renamed,
    Copied,
    Unmerged,
    Untracked,
    Ignored,
}

impl StatusSymbol {
    /// Every symbol in the porcelain alphabet.
    pub const ALL: [StatusSymbol; 10] = [
        StatusSymbol::Unmodified,
        StatusSymbol::Modified,
        StatusSymbol::TypeChanged,
        StatusSymbol::Added,
        StatusSymbol::Deleted,
        StatusSymbol::Renamed,
        StatusSymbol::Copied,
        StatusSymbol::Unmerged,
        StatusSymbol::Untracked,
        StatusSymbol::Ignored,
    ];

    pub fn as_char(self) -> char {
        match self {
            StatusSymbol::Unmodified => ' ',
            StatusSymbol::Modified => 'M',
            StatusSymbol::TypeChanged => 'T',
            StatusSymbol::Added => 'A',
            StatusSymbol::Deleted => 'D',
            StatusSymbol::Renamed => 'R',
            StatusSymbol::Copied => 'C',
            StatusSymbol::Unmerged => 'U',
            StatusSymbol::Untracked => '?',
            StatusSymbol::Ignored => '!',
        }
    }
}

impl TryFrom<char> for StatusSymbol {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        StatusSymbol::ALL
            .into_iter()
            .find(|s| s.as_char() == c)
            .ok_or(c)
    }
}

/// A two-symbol porcelain status code (`X` = index, `Y` = working tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode {
    pub index: StatusSymbol,
    pub worktree: StatusSymbol,
}

impl StatusCode {
    pub const UNTRACKED: StatusCode = StatusCode {
        index: StatusSymbol::Untracked,
        worktree: StatusSymbol::Untracked,
    };

    pub fn new(index: StatusSymbol, worktree: StatusSymbol) -> Self {
        Self { index, worktree }
    }

    /// Parse exactly two porcelain symbols, e.g. `"M "` or `"??"`.
    pub fn parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let index = StatusSymbol::try_from(chars.next()?).ok()?;
        let worktree = StatusSymbol::try_from(chars.next()?).ok()?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { index, worktree })
    }

    /// Unknown to version control (`??`).
    pub fn is_untracked(self) -> bool {
        self == Self::UNTRACKED
    }

    /// Something for this path is recorded in the index.
    pub fn is_staged(self) -> bool {
        !matches!(
            self.index,
            StatusSymbol::Unmodified | StatusSymbol::Untracked
        )
    }

    /// The working tree holds changes that are not yet in the index.
    pub fn has_unstaged_changes(self) -> bool {
        self.is_untracked() || self.worktree != StatusSymbol::Unmodified
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.index.as_char(), self.worktree.as_char())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A changed path from `git status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub code: StatusCode,
    /// Source path for renames and copies.
    pub original_path: Option<String>,
    pub staged: bool,
    pub untracked: bool,
}

impl FileChange {
    pub fn new(path: impl Into<String>, code: StatusCode) -> Self {
        Self {
            path: path.into(),
            code,
            original_path: None,
            staged: code.is_staged(),
            untracked: code.is_untracked(),
        }
    }

    pub fn has_unstaged_changes(&self) -> bool {
        self.code.has_unstaged_changes()
    }
}

/// Parsed `## ...` branch header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    /// Header text after `## `, e.g. `main...origin/main [ahead 1]`.
    pub descriptor: String,
    pub local: String,
    pub upstream: Option<String>,
    pub ahead: u32,
    pub behind: u32,
}

impl BranchInfo {
    pub fn parse(descriptor: &str) -> Self {
        let descriptor = descriptor.trim();

        let (refs, tracking) = match descriptor.split_once(" [") {
            Some((refs, rest)) => (refs, rest.trim_end_matches(']')),
            None => (descriptor, ""),
        };

        let (local, upstream) = match refs.split_once("...") {
            Some((local, upstream)) => (local, Some(upstream.to_string())),
            None => (refs, None),
        };

        let local = local
            .strip_prefix("No commits yet on ")
            .or_else(|| local.strip_prefix("Initial commit on "))
            .unwrap_or(local);

        Self {
            descriptor: descriptor.to_string(),
            local: local.to_string(),
            upstream,
            ahead: tracking_count(tracking_regex_ahead(), tracking),
            behind: tracking_count(tracking_regex_behind(), tracking),
        }
    }
}

fn tracking_regex_ahead() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ahead (\d+)").expect("valid regex"))
}

fn tracking_regex_behind() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"behind (\d+)").expect("valid regex"))
}

fn tracking_count(re: &Regex, tracking: &str) -> u32 {
    re.captures(tracking)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Branch descriptor plus ordered changes, captured once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingTreeSnapshot {
    pub branch: BranchInfo,
    pub files: Vec<FileChange>,
}

impl WorkingTreeSnapshot {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parse the output of `git status -sb --porcelain`.
pub fn parse_status(output: &str) -> Result<WorkingTreeSnapshot, GitError> {
    let mut snapshot = WorkingTreeSnapshot::default();

    for line in output.lines() {
        if let Some(header) = line.strip_prefix("## ") {
            snapshot.branch = BranchInfo::parse(header);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if line.len() < 4 || !line.is_char_boundary(2) || !line.is_char_boundary(3) {
            return Err(GitError::InvalidStatus(line.to_string()));
        }

        let code = StatusCode::parse(&line[..2])
            .ok_or_else(|| GitError::InvalidStatus(line.to_string()))?;
        let raw_path = line[3..].trim();

        let change = match raw_path.split_once(" -> ") {
            Some((from, to)) => {
                let mut change = FileChange::new(unquote(to), code);
                change.original_path = Some(unquote(from));
                change
            }
            None => FileChange::new(unquote(raw_path), code),
        };
        snapshot.files.push(change);
    }

    Ok(snapshot)
}

/// Decode a path as git prints it.
///
/// Paths containing special or non-ASCII bytes come wrapped in double quotes
/// with C-style escapes, non-ASCII bytes as three-digit octal (`\303\251`).
/// Unquoted input is returned unchanged.
pub fn unquote(path: &str) -> String {
    let Some(inner) = path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut input = inner.bytes().peekable();
    while let Some(b) = input.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match input.next() {
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'n') => bytes.push(b'\n'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'v') => bytes.push(0x0b),
            Some(digit @ b'0'..=b'7') => {
                let mut value = digit - b'0';
                for _ in 0..2 {
                    match input.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value.wrapping_mul(8).wrapping_add(next - b'0');
                            input.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value);
            }
            // \" and \\
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
