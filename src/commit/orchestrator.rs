//! Sequences staging, classification, composition and the final commit.
//!
//! Interactive machines are driven through [`Interaction`] so the workflow can
//! be exercised with scripted input. Every VCS mutation happens here, after a
//! machine has reached a terminal state.

use std::fmt;

use tracing::debug;

use crate::error::{CommitError, UiError};
use crate::git::Vcs;
use crate::stage::{SelectorEffect, SelectorMode, SelectorPhase, WorkingTreeSelector};

use super::classify::classify_diff;
use super::composer::{CommitComposer, CommitDecision, ComposerEffect};

/// Runs an interactive machine from its initial state to a terminal state.
pub trait Interaction {
    fn select_files(
        &mut self,
        selector: WorkingTreeSelector,
    ) -> Result<(WorkingTreeSelector, Vec<SelectorEffect>), UiError>;

    fn compose(
        &mut self,
        composer: CommitComposer,
    ) -> Result<(CommitComposer, Vec<ComposerEffect>), UiError>;
}

/// What to do when nothing is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyDiffPolicy {
    /// Let the user pick files to stage, then continue.
    AutoStage,
    /// Stop with [`NothingReason::CleanTree`].
    Abort,
    /// Continue anyway, e.g. to reword the last commit.
    Allow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// Commit this text as-is, skipping the composer.
    pub manual_message: Option<String>,
    /// Seed the composer with this text instead of a classification.
    pub preset_message: Option<String>,
    pub amend: bool,
    pub empty_diff: EmptyDiffPolicy,
}

impl CommitRequest {
    pub fn new(empty_diff: EmptyDiffPolicy) -> Self {
        Self {
            manual_message: None,
            preset_message: None,
            amend: false,
            empty_diff,
        }
    }
}

/// Why a workflow ended without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingReason {
    NothingStaged,
    NoSelection,
    NoUnstagedFiles,
    Cancelled,
    CleanTree,
}

impl fmt::Display for NothingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NothingReason::NothingStaged => "Nothing staged. Commit aborted.",
            NothingReason::NoSelection => "No files selected.",
            NothingReason::NoUnstagedFiles => "No unstaged files to stage.",
            NothingReason::Cancelled => "Canceled.",
            NothingReason::CleanTree => "Working tree clean. Nothing to commit.",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed {
        message: String,
        amended: bool,
        /// git's own report of the commit.
        output: String,
    },
    NothingToDo(NothingReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Paths staged, in selection order.
    Staged(Vec<String>),
    NothingToDo(NothingReason),
}

/// Let the user pick unstaged files and stage each one.
///
/// A staging failure stops immediately; paths staged before it stay staged.
pub fn stage_interactively<V, I>(vcs: &V, interaction: &mut I) -> Result<StageOutcome, CommitError>
where
    V: Vcs + ?Sized,
    I: Interaction + ?Sized,
{
    let snapshot = vcs.status()?;
    if snapshot.is_clean() {
        return Ok(StageOutcome::NothingToDo(NothingReason::CleanTree));
    }

    let selector = WorkingTreeSelector::new(&snapshot, SelectorMode::Add);
    if selector.files().is_empty() {
        return Ok(StageOutcome::NothingToDo(NothingReason::NoUnstagedFiles));
    }

    let (selector, effects) = interaction.select_files(selector)?;
    if selector.phase() != SelectorPhase::Done {
        debug!("File selection quit");
        return Ok(StageOutcome::NothingToDo(NothingReason::Cancelled));
    }
    if effects.is_empty() {
        return Ok(StageOutcome::NothingToDo(NothingReason::NoSelection));
    }

    let mut staged = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            SelectorEffect::Stage { path } => {
                vcs.stage(&path)?;
                staged.push(path);
            }
        }
    }
    debug!("Staged {} file(s)", staged.len());
    Ok(StageOutcome::Staged(staged))
}

/// Run the commit workflow described by `request`.
///
/// At most one commit call is issued. VCS failures are returned as-is.
pub fn run_commit<V, I>(
    vcs: &V,
    interaction: &mut I,
    request: &CommitRequest,
) -> Result<CommitOutcome, CommitError>
where
    V: Vcs + ?Sized,
    I: Interaction + ?Sized,
{
    // Step 1: make sure something is staged
    let mut diff = vcs.staged_diff()?;
    if diff.trim().is_empty() {
        match request.empty_diff {
            EmptyDiffPolicy::AutoStage => {
                debug!("No staged changes, starting interactive staging");
                if let StageOutcome::NothingToDo(reason) = stage_interactively(vcs, interaction)? {
                    return Ok(CommitOutcome::NothingToDo(reason));
                }
                diff = vcs.staged_diff()?;
                if diff.trim().is_empty() {
                    return Ok(CommitOutcome::NothingToDo(NothingReason::NothingStaged));
                }
            }
            EmptyDiffPolicy::Abort => {
                return Ok(CommitOutcome::NothingToDo(NothingReason::CleanTree));
            }
            EmptyDiffPolicy::Allow => debug!("Empty diff allowed, continuing"),
        }
    }

    // Step 2: a manual message goes straight to git
    if let Some(message) = &request.manual_message {
        return commit(vcs, message, request.amend);
    }

    // Step 3: review the working message
    let working = match &request.preset_message {
        Some(preset) => preset.clone(),
        None => classify_diff(&diff).message(),
    };
    debug!("Proposed message: {}", working);

    let (composer, effects) = interaction.compose(CommitComposer::new(working))?;
    if composer.decision() == CommitDecision::Cancel || !composer.is_terminal() {
        return Ok(CommitOutcome::NothingToDo(NothingReason::Cancelled));
    }

    match effects.into_iter().next() {
        Some(ComposerEffect::Commit { message }) => commit(vcs, &message, request.amend),
        None => Ok(CommitOutcome::NothingToDo(NothingReason::Cancelled)),
    }
}

fn commit<V: Vcs + ?Sized>(vcs: &V, message: &str, amend: bool) -> Result<CommitOutcome, CommitError> {
    let output = vcs.commit(message, amend)?;
    Ok(CommitOutcome::Committed {
        message: message.to_string(),
        amended: amend,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::ComposerEvent;
    use crate::error::GitError;
    use crate::git::executor::MockVcs;
    use crate::git::{BranchInfo, FileChange, StatusCode, WorkingTreeSnapshot};
    use crate::stage::SelectorEvent;

    const DOCS_DIFF: &str = "diff --git a/docs/guide.md b/docs/guide.md\n+hello\n";
    const SOURCE_DIFF: &str = "diff --git a/src/main.rs b/src/main.rs\n+fn main() {}\n";

    /// Feeds fixed event lists to the machines and counts how often each runs.
    #[derive(Default)]
    struct ScriptedInteraction {
        selector_events: Vec<SelectorEvent>,
        composer_events: Vec<ComposerEvent>,
        selections: usize,
        compositions: usize,
        seen_message: Option<String>,
    }

    impl ScriptedInteraction {
        fn selecting(events: impl Into<Vec<SelectorEvent>>) -> Self {
            Self {
                selector_events: events.into(),
                ..Default::default()
            }
        }

        fn composing(events: impl Into<Vec<ComposerEvent>>) -> Self {
            Self {
                composer_events: events.into(),
                ..Default::default()
            }
        }
    }

    impl Interaction for ScriptedInteraction {
        fn select_files(
            &mut self,
            selector: WorkingTreeSelector,
        ) -> Result<(WorkingTreeSelector, Vec<SelectorEffect>), UiError> {
            self.selections += 1;
            Ok(selector.reduce_all(self.selector_events.clone()))
        }

        fn compose(
            &mut self,
            composer: CommitComposer,
        ) -> Result<(CommitComposer, Vec<ComposerEffect>), UiError> {
            self.compositions += 1;
            self.seen_message = Some(composer.message().to_string());
            Ok(composer.reduce_all(self.composer_events.clone()))
        }
    }

    fn dirty_snapshot() -> WorkingTreeSnapshot {
        WorkingTreeSnapshot {
            branch: BranchInfo::parse("main"),
            files: vec![
                FileChange::new("src/main.rs", StatusCode::parse(" M").unwrap()),
                FileChange::new("notes.txt", StatusCode::UNTRACKED),
            ],
        }
    }

    fn vcs_with_diff(diff: &'static str) -> MockVcs {
        let mut vcs = MockVcs::new();
        vcs.expect_staged_diff()
            .times(1)
            .returning(move || Ok(diff.to_string()));
        vcs
    }

    #[test]
    fn test_empty_diff_zero_selection_mutates_nothing() {
        let mut vcs = vcs_with_diff("");
        vcs.expect_status().times(1).returning(|| Ok(dirty_snapshot()));
        vcs.expect_stage().never();
        vcs.expect_commit().never();

        let mut ui = ScriptedInteraction::selecting([SelectorEvent::Confirm]);
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(outcome, CommitOutcome::NothingToDo(NothingReason::NoSelection));
        assert_eq!(ui.compositions, 0);
    }

    #[test]
    fn test_empty_diff_quit_selection_mutates_nothing() {
        let mut vcs = vcs_with_diff("");
        vcs.expect_status().times(1).returning(|| Ok(dirty_snapshot()));
        vcs.expect_stage().never();
        vcs.expect_commit().never();

        let mut ui = ScriptedInteraction::selecting([SelectorEvent::Toggle, SelectorEvent::Quit]);
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(outcome, CommitOutcome::NothingToDo(NothingReason::Cancelled));
    }

    #[test]
    fn test_manual_message_commits_literal_text() {
        let mut vcs = vcs_with_diff(SOURCE_DIFF);
        vcs.expect_commit()
            .withf(|message: &str, amend: &bool| message == "wip: literal text" && !*amend)
            .times(1)
            .returning(|_, _| Ok("[main abc123] wip: literal text".to_string()));

        let mut ui = ScriptedInteraction::default();
        let request = CommitRequest {
            manual_message: Some("wip: literal text".into()),
            ..CommitRequest::new(EmptyDiffPolicy::AutoStage)
        };
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(ui.compositions, 0);
        assert_eq!(ui.selections, 0);
        assert!(matches!(
            outcome,
            CommitOutcome::Committed { ref message, amended: false, .. } if message == "wip: literal text"
        ));
    }

    #[test]
    fn test_classified_message_applied() {
        let mut vcs = vcs_with_diff(DOCS_DIFF);
        vcs.expect_commit()
            .withf(|message: &str, _: &bool| message == "docs: update documentation")
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let mut ui = ScriptedInteraction::composing([ComposerEvent::Activate]);
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(ui.seen_message.as_deref(), Some("docs: update documentation"));
        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
    }

    #[test]
    fn test_composer_cancel_mutates_nothing() {
        let mut vcs = vcs_with_diff(SOURCE_DIFF);
        vcs.expect_commit().never();

        let mut ui = ScriptedInteraction::composing([ComposerEvent::Quit]);
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(outcome, CommitOutcome::NothingToDo(NothingReason::Cancelled));
    }

    #[test]
    fn test_auto_stage_then_commit() {
        let mut vcs = MockVcs::new();
        let mut diffs = vec![SOURCE_DIFF.to_string(), String::new()];
        vcs.expect_staged_diff()
            .times(2)
            .returning(move || Ok(diffs.pop().unwrap_or_default()));
        vcs.expect_status().times(1).returning(|| Ok(dirty_snapshot()));
        vcs.expect_stage()
            .withf(|path: &str| path == "src/main.rs")
            .times(1)
            .returning(|_| Ok(String::new()));
        vcs.expect_commit()
            .withf(|message: &str, _: &bool| message == "feat: implement feature")
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let mut ui = ScriptedInteraction {
            selector_events: vec![SelectorEvent::Toggle, SelectorEvent::Confirm],
            composer_events: vec![ComposerEvent::Activate],
            ..Default::default()
        };
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(ui.selections, 1);
        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
    }

    #[test]
    fn test_abort_policy_on_empty_diff() {
        let mut vcs = vcs_with_diff("");
        vcs.expect_status().never();
        vcs.expect_commit().never();

        let mut ui = ScriptedInteraction::default();
        let request = CommitRequest::new(EmptyDiffPolicy::Abort);
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(outcome, CommitOutcome::NothingToDo(NothingReason::CleanTree));
        assert_eq!(ui.selections, 0);
    }

    #[test]
    fn test_amend_rewords_with_preset_message() {
        let mut vcs = vcs_with_diff("");
        vcs.expect_commit()
            .withf(|message: &str, amend: &bool| message == "fix: old message" && *amend)
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let mut ui = ScriptedInteraction::composing([ComposerEvent::Activate]);
        let request = CommitRequest {
            preset_message: Some("fix: old message".into()),
            amend: true,
            ..CommitRequest::new(EmptyDiffPolicy::Allow)
        };
        let outcome = run_commit(&vcs, &mut ui, &request).unwrap();

        assert_eq!(ui.seen_message.as_deref(), Some("fix: old message"));
        assert!(matches!(outcome, CommitOutcome::Committed { amended: true, .. }));
    }

    #[test]
    fn test_commit_failure_is_surfaced() {
        let mut vcs = vcs_with_diff(SOURCE_DIFF);
        vcs.expect_commit().times(1).returning(|_, _| {
            Err(GitError::MutationFailed {
                operation: "commit".into(),
                stderr: "hook rejected".into(),
            })
        });

        let mut ui = ScriptedInteraction::composing([ComposerEvent::Activate]);
        let request = CommitRequest::new(EmptyDiffPolicy::AutoStage);
        let err = run_commit(&vcs, &mut ui, &request).unwrap_err();

        assert!(matches!(err, CommitError::Git(ref e) if e.is_mutation()));
    }

    #[test]
    fn test_stage_interactively_clean_tree() {
        let mut vcs = MockVcs::new();
        vcs.expect_status().times(1).returning(|| {
            Ok(WorkingTreeSnapshot {
                branch: BranchInfo::parse("main"),
                files: Vec::new(),
            })
        });

        let mut ui = ScriptedInteraction::default();
        let outcome = stage_interactively(&vcs, &mut ui).unwrap();

        assert_eq!(outcome, StageOutcome::NothingToDo(NothingReason::CleanTree));
        assert_eq!(ui.selections, 0);
    }

    #[test]
    fn test_stage_interactively_only_staged_files() {
        let mut vcs = MockVcs::new();
        vcs.expect_status().times(1).returning(|| {
            Ok(WorkingTreeSnapshot {
                branch: BranchInfo::parse("main"),
                files: vec![FileChange::new("a.rs", StatusCode::parse("M ").unwrap())],
            })
        });

        let mut ui = ScriptedInteraction::default();
        let outcome = stage_interactively(&vcs, &mut ui).unwrap();

        assert_eq!(outcome, StageOutcome::NothingToDo(NothingReason::NoUnstagedFiles));
    }

    #[test]
    fn test_stage_failure_stops_staging() {
        let mut vcs = MockVcs::new();
        vcs.expect_status().times(1).returning(|| Ok(dirty_snapshot()));
        vcs.expect_stage().times(1).returning(|_| {
            Err(GitError::MutationFailed {
                operation: "add".into(),
                stderr: "index.lock exists".into(),
            })
        });

        let mut ui = ScriptedInteraction::selecting([SelectorEvent::ToggleAll, SelectorEvent::Confirm]);
        let err = stage_interactively(&vcs, &mut ui).unwrap_err();

        assert!(matches!(err, CommitError::Git(GitError::MutationFailed { .. })));
    }
}
