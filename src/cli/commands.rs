//! Handlers for each subcommand. All printing happens here.

use chrono::Local;
use dialoguer::Confirm;
use tracing::debug;

use crate::commit::{
    CommitOutcome, CommitRequest, EmptyDiffPolicy, Interaction, NothingReason, StageOutcome,
    classify_diff, run_commit, stage_interactively,
};
use crate::error::{CommitError, UiError};
use crate::git::Vcs;
use crate::render;
use crate::stage::{SelectorMode, WorkingTreeSelector};
use crate::stats::{ContributionCalendar, HeatmapGrid};
use crate::tui;

const STAGE_ALL: &str = ".";

pub fn status(vcs: &dyn Vcs) -> Result<(), CommitError> {
    let snapshot = vcs.status()?;
    let selector = WorkingTreeSelector::new(&snapshot, SelectorMode::View);
    print!("{}", render::status_view(&selector));
    Ok(())
}

pub fn add(vcs: &dyn Vcs, interaction: &mut dyn Interaction, all: bool) -> Result<(), CommitError> {
    if all {
        vcs.stage(STAGE_ALL)?;
        println!("{}", render::success("Staged all changes."));
        return Ok(());
    }

    match stage_interactively(vcs, interaction)? {
        StageOutcome::Staged(paths) => println!("{}", render::staged_list(&paths)),
        StageOutcome::NothingToDo(reason) => println!("{reason}"),
    }
    Ok(())
}

pub fn unstage(vcs: &dyn Vcs, paths: &[String]) -> Result<(), CommitError> {
    for path in paths {
        vcs.unstage(path)?;
        println!("{}", render::success(&format!("Unstaged {path}")));
    }
    Ok(())
}

pub fn commit(
    vcs: &dyn Vcs,
    interaction: &mut dyn Interaction,
    message: Option<String>,
) -> Result<(), CommitError> {
    let request = CommitRequest {
        manual_message: message,
        ..CommitRequest::new(EmptyDiffPolicy::AutoStage)
    };
    let outcome = run_commit(vcs, interaction, &request)?;
    report(&outcome);
    Ok(())
}

pub fn save(
    vcs: &dyn Vcs,
    interaction: &mut dyn Interaction,
    message: Option<String>,
) -> Result<(), CommitError> {
    vcs.stage(STAGE_ALL)?;

    let request = CommitRequest {
        manual_message: message,
        ..CommitRequest::new(EmptyDiffPolicy::Abort)
    };
    match run_commit(vcs, interaction, &request)? {
        CommitOutcome::NothingToDo(NothingReason::CleanTree) => {
            println!("No changes to save (working tree clean).");
        }
        outcome => report(&outcome),
    }
    Ok(())
}

pub fn amend(
    vcs: &dyn Vcs,
    interaction: &mut dyn Interaction,
    message: Option<String>,
) -> Result<(), CommitError> {
    let last = vcs.last_commit_message()?;
    debug!("Amending commit with message: {}", last);

    let request = CommitRequest {
        manual_message: message,
        preset_message: Some(last),
        amend: true,
        empty_diff: EmptyDiffPolicy::Allow,
    };
    let outcome = run_commit(vcs, interaction, &request)?;
    report(&outcome);
    Ok(())
}

pub fn fix(vcs: &dyn Vcs, yes: bool) -> Result<(), CommitError> {
    if yes {
        fix_with(vcs, || Ok(true))
    } else {
        fix_with(vcs, confirm_fix)
    }
}

/// Stage everything and amend, once `confirm` agrees. Nothing is touched
/// when the prompt is declined or fails.
fn fix_with(
    vcs: &dyn Vcs,
    confirm: impl FnOnce() -> Result<bool, UiError>,
) -> Result<(), CommitError> {
    if !confirm()? {
        println!("Aborted.");
        return Ok(());
    }

    vcs.stage(STAGE_ALL)?;
    let output = vcs.amend_no_edit()?;
    print_git_output(&output);
    println!("{}", render::success("Patched last commit successfully."));
    Ok(())
}

fn confirm_fix() -> Result<bool, UiError> {
    Confirm::new()
        .with_prompt("This will stage ALL changes and amend the last commit (no-edit). Continue?")
        .default(false)
        .interact()
        .map_err(|e| UiError::Prompt(e.to_string()))
}

pub fn undo(vcs: &dyn Vcs) -> Result<(), CommitError> {
    vcs.reset_last_commit_soft()?;
    println!("{}", render::success("Undid last commit. Changes are now staged."));
    Ok(())
}

pub fn suggest(vcs: &dyn Vcs, json: bool) -> Result<(), CommitError> {
    let diff = vcs.staged_diff()?;

    if diff.trim().is_empty() {
        if json {
            println!("null");
            return Ok(());
        }
        // Status is only consulted to pick the hint
        match vcs.status() {
            Ok(snapshot) if !snapshot.is_clean() => {
                println!("{}", render::notice("No staged changes found."));
                println!(
                    "{}",
                    render::hint("Tip: Use 'raven commit' to stage, analyze, and commit in one go.")
                );
                println!("{}", render::hint("   Or run 'raven add' to stage files manually."));
            }
            _ => println!("{}", render::success("Working tree clean. Nothing to commit.")),
        }
        return Ok(());
    }

    let suggestion = classify_diff(&diff);
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestion).map_err(UiError::from)?);
    } else {
        print!("{}", render::suggestion_box(&suggestion.message()));
    }
    Ok(())
}

pub fn stats(vcs: &dyn Vcs, heatmap: bool) -> Result<(), CommitError> {
    let histogram = vcs.commit_counts()?;
    let today = Local::now().date_naive();

    if heatmap {
        print!("{}", render::heatmap(&HeatmapGrid::new(today), &histogram));
        return Ok(());
    }

    tui::browse_calendar(ContributionCalendar::new(histogram, today))?;
    Ok(())
}

fn report(outcome: &CommitOutcome) {
    match outcome {
        CommitOutcome::Committed {
            amended, output, ..
        } => {
            print_git_output(output);
            let text = if *amended {
                "Commit amended successfully!"
            } else {
                "Commit successful!"
            };
            println!("{}", render::success(text));
        }
        CommitOutcome::NothingToDo(NothingReason::Cancelled) => println!("Commit canceled."),
        CommitOutcome::NothingToDo(reason) => println!("{reason}"),
    }
}

fn print_git_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::{CommitComposer, ComposerEffect};
    use crate::error::GitError;
    use crate::git::executor::MockVcs;
    use crate::stage::SelectorEffect;

    /// Fails the test if any interactive screen is opened.
    struct NoInteraction;

    impl Interaction for NoInteraction {
        fn select_files(
            &mut self,
            _: WorkingTreeSelector,
        ) -> Result<(WorkingTreeSelector, Vec<SelectorEffect>), UiError> {
            panic!("selector should not open");
        }

        fn compose(
            &mut self,
            _: CommitComposer,
        ) -> Result<(CommitComposer, Vec<ComposerEffect>), UiError> {
            panic!("composer should not open");
        }
    }

    #[test]
    fn test_add_dot_stages_everything() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage()
            .withf(|path: &str| path == ".")
            .times(1)
            .returning(|_| Ok(String::new()));
        vcs.expect_status().never();

        add(&vcs, &mut NoInteraction, true).unwrap();
    }

    #[test]
    fn test_unstage_each_path() {
        let mut vcs = MockVcs::new();
        vcs.expect_unstage().times(2).returning(|_| Ok(String::new()));

        unstage(&vcs, &["a.rs".to_string(), "b.rs".to_string()]).unwrap();
    }

    #[test]
    fn test_save_on_clean_tree_commits_nothing() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage().times(1).returning(|_| Ok(String::new()));
        vcs.expect_staged_diff().times(1).returning(|| Ok(String::new()));
        vcs.expect_commit().never();

        save(&vcs, &mut NoInteraction, None).unwrap();
    }

    #[test]
    fn test_save_with_message_skips_composer() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage().times(1).returning(|_| Ok(String::new()));
        vcs.expect_staged_diff()
            .times(1)
            .returning(|| Ok("diff --git a/go.mod b/go.mod\n".to_string()));
        vcs.expect_commit()
            .withf(|message: &str, amend: &bool| message == "chore: bump" && !*amend)
            .times(1)
            .returning(|_, _| Ok(String::new()));

        save(&vcs, &mut NoInteraction, Some("chore: bump".into())).unwrap();
    }

    #[test]
    fn test_amend_with_message_rewords() {
        let mut vcs = MockVcs::new();
        vcs.expect_last_commit_message()
            .times(1)
            .returning(|| Ok("feat: old".to_string()));
        vcs.expect_staged_diff().times(1).returning(|| Ok(String::new()));
        vcs.expect_commit()
            .withf(|message: &str, amend: &bool| message == "feat: new" && *amend)
            .times(1)
            .returning(|_, _| Ok(String::new()));

        amend(&vcs, &mut NoInteraction, Some("feat: new".into())).unwrap();
    }

    #[test]
    fn test_fix_with_yes_amends_without_prompt() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage().times(1).returning(|_| Ok(String::new()));
        vcs.expect_amend_no_edit().times(1).returning(|| Ok(String::new()));

        fix(&vcs, true).unwrap();
    }

    #[test]
    fn test_fix_declined_leaves_index_alone() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage().never();
        vcs.expect_amend_no_edit().never();

        fix_with(&vcs, || Ok(false)).unwrap();
    }

    #[test]
    fn test_fix_prompt_failure_leaves_index_alone() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage().never();
        vcs.expect_amend_no_edit().never();

        let err = fix_with(&vcs, || Err(UiError::Prompt("not a terminal".into()))).unwrap_err();
        assert!(matches!(err, CommitError::Ui(UiError::Prompt(_))));
    }

    #[test]
    fn test_undo_failure_propagates() {
        let mut vcs = MockVcs::new();
        vcs.expect_reset_last_commit_soft().times(1).returning(|| {
            Err(GitError::MutationFailed {
                operation: "reset --soft".into(),
                stderr: "fatal: ambiguous argument 'HEAD~1'".into(),
            })
        });

        let err = undo(&vcs).unwrap_err();
        assert!(err.to_string().contains("HEAD~1"));
    }

    #[test]
    fn test_suggest_empty_diff_ignores_status_error() {
        let mut vcs = MockVcs::new();
        vcs.expect_staged_diff().times(1).returning(|| Ok(String::new()));
        vcs.expect_status().times(1).returning(|| {
            Err(GitError::QueryFailed {
                operation: "status".into(),
                stderr: "boom".into(),
            })
        });

        suggest(&vcs, false).unwrap();
    }

    #[test]
    fn test_stats_heatmap_reads_history() {
        let mut vcs = MockVcs::new();
        vcs.expect_commit_counts().times(1).returning(|| Ok(Default::default()));

        stats(&vcs, true).unwrap();
    }
}
