//! raven - a terminal git assistant.
//!
//! # Overview
//!
//! raven inspects the working tree, suggests a conventional commit message from
//! the paths in the staged diff, and lets the user stage files, review or edit
//! the suggestion, and commit. All git access goes through the `git` binary.

pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod render;
pub mod stage;
pub mod stats;
pub mod tui;

// Re-export commonly used types
pub use commit::{CommitOutcome, CommitRequest, NothingReason, Suggestion, SuggestionType, classify_diff};
pub use error::{CommitError, GitError, UiError};
pub use git::{CommitCountHistogram, FileChange, GitCli, Vcs, WorkingTreeSnapshot};
