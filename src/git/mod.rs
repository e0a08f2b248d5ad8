//! Git operations: status parsing, history, and the subprocess-backed collaborator.

pub mod executor;
pub mod history;
pub mod repo;
pub mod status;

pub use executor::{GitCli, Vcs};
pub use history::{CommitCountHistogram, last_six_months};
pub use repo::open_repository;
pub use status::{BranchInfo, FileChange, StatusCode, StatusSymbol, WorkingTreeSnapshot};
