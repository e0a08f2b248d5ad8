//! Commit message suggestion, review, and the commit workflow.

pub mod classify;
pub mod composer;
pub mod orchestrator;

pub use classify::{Suggestion, SuggestionType, classify_diff};
pub use composer::{
    CommitComposer, CommitDecision, ComposerAction, ComposerEffect, ComposerEvent, ComposerPhase,
    MAX_EDIT_CHARS,
};
pub use orchestrator::{
    CommitOutcome, CommitRequest, EmptyDiffPolicy, Interaction, NothingReason, StageOutcome,
    run_commit, stage_interactively,
};
