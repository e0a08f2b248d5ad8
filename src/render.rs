//! Static, non-interactive output styled with `console`.

use console::style;

use crate::git::CommitCountHistogram;
use crate::stage::WorkingTreeSelector;
use crate::stats::heatmap::WEEKDAY_LABELS;
use crate::stats::{HeatmapGrid, IntensityTier};

/// One-shot projection of a View-mode selector, like `git status`.
pub fn status_view(selector: &WorkingTreeSelector) -> String {
    let mut out = String::new();
    let branch = selector.branch();

    if !branch.descriptor.is_empty() {
        let mut header = format!("On branch {}", branch.local);
        if branch.ahead > 0 {
            header.push_str(&format!(" \u{2191}{}", branch.ahead));
        }
        if branch.behind > 0 {
            header.push_str(&format!(" \u{2193}{}", branch.behind));
        }
        out.push_str(&format!("{}\n", style(header).cyan().bold()));
        if let Some(upstream) = &branch.upstream {
            out.push_str(&format!("{}\n", style(format!("tracking {upstream}")).dim()));
        }
        out.push('\n');
    }

    if selector.files().is_empty() {
        out.push_str(&format!("{}\n", style("Working tree clean.").green()));
        return out;
    }

    let groups = selector.groups();
    for (title, indices) in [
        ("Changes to be committed / Modified:", &groups.tracked),
        ("Untracked files:", &groups.untracked),
    ] {
        if indices.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", style(title).dim().bold()));
        for &i in indices {
            let file = &selector.files()[i];
            let line = if file.untracked {
                style(format!(" ?  {}", file.path)).white().dim()
            } else if file.staged {
                style(format!(" +  {}", file.path)).cyan()
            } else {
                style(format!(" M  {}", file.path)).magenta()
            };
            out.push_str(&format!("  {line}\n"));
        }
        out.push('\n');
    }

    out
}

pub fn suggestion_box(message: &str) -> String {
    let width = message.chars().count() + 4;
    let rule = "\u{2500}".repeat(width);
    format!(
        "{}\n\n  \u{256d}{rule}\u{256e}\n  \u{2502}  {}  \u{2502}\n  \u{2570}{rule}\u{256f}\n",
        style("Raven Suggestion").magenta().bold(),
        style(message).white().bold(),
    )
}

/// `✔ Staged N files:` followed by one line per path.
pub fn staged_list(paths: &[String]) -> String {
    let noun = if paths.len() == 1 { "file" } else { "files" };
    let mut out = success(&format!("Staged {} {noun}:", paths.len()));
    for path in paths {
        out.push_str(&format!("\n{}", style(format!("  + {path}")).dim()));
    }
    out
}

pub fn success(text: &str) -> String {
    format!("{}", style(format!("\u{2714} {text}")).cyan().bold())
}

pub fn notice(text: &str) -> String {
    format!("{}", style(text).magenta())
}

pub fn hint(text: &str) -> String {
    format!("{}", style(text).dim())
}

fn tier_cell(tier: Option<IntensityTier>) -> String {
    let Some(tier) = tier else {
        return " ".to_string();
    };
    let cell = match tier {
        IntensityTier::None => style("\u{25a1}").color256(240),
        IntensityTier::Low => style("\u{25a0}").color256(22),
        IntensityTier::Medium => style("\u{25a0}").color256(28),
        IntensityTier::High => style("\u{25a0}").color256(34),
        IntensityTier::VeryHigh => style("\u{25a0}").color256(46),
        IntensityTier::Exceptional => style("\u{25a0}").color256(220),
    };
    cell.to_string()
}

/// Six-month heatmap: weekday rows, week columns, then a legend.
pub fn heatmap(grid: &HeatmapGrid, histogram: &CommitCountHistogram) -> String {
    let mut out = format!("{}\n\n", style("Contribution Activity").magenta().bold());

    for (label, row) in WEEKDAY_LABELS.iter().zip(grid.tiers(histogram)) {
        let cells: Vec<String> = row.into_iter().map(tier_cell).collect();
        out.push_str(&format!("{} {}\n", style(label).dim(), cells.join(" ")));
    }

    let legend = [
        (IntensityTier::None, "0"),
        (IntensityTier::Low, "1-2"),
        (IntensityTier::Medium, "3-5"),
        (IntensityTier::High, "6-10"),
        (IntensityTier::VeryHigh, "11-15"),
        (IntensityTier::Exceptional, "16+"),
    ]
    .iter()
    .map(|(tier, range)| format!("{} {range}", tier_cell(Some(*tier))))
    .collect::<Vec<_>>()
    .join("  ");
    out.push_str(&format!("\n{legend}\n"));
    out.push_str(&format!(
        "{}\n",
        style(format!("{} commits in the last six months", histogram_total(grid, histogram))).dim()
    ));

    out
}

fn histogram_total(grid: &HeatmapGrid, histogram: &CommitCountHistogram) -> u32 {
    grid.rows()
        .iter()
        .flatten()
        .flatten()
        .map(|d| histogram.count(*d))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{BranchInfo, FileChange, StatusCode, WorkingTreeSnapshot};
    use crate::stage::SelectorMode;
    use chrono::NaiveDate;
    use console::strip_ansi_codes;

    fn plain(s: &str) -> String {
        strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_status_view_groups_files() {
        let snapshot = WorkingTreeSnapshot {
            branch: BranchInfo::parse("main...origin/main [ahead 2]"),
            files: vec![
                FileChange::new("new.txt", StatusCode::UNTRACKED),
                FileChange::new("src/lib.rs", StatusCode::parse(" M").unwrap()),
                FileChange::new("Cargo.toml", StatusCode::parse("M ").unwrap()),
            ],
        };
        let selector = WorkingTreeSelector::new(&snapshot, SelectorMode::View);
        let out = plain(&status_view(&selector));

        assert!(out.starts_with("On branch main \u{2191}2\n"));
        assert!(out.contains("tracking origin/main"));
        let modified = out.find(" M  src/lib.rs").unwrap();
        let staged = out.find(" +  Cargo.toml").unwrap();
        let untracked = out.find(" ?  new.txt").unwrap();
        assert!(modified < untracked && staged < untracked);
    }

    #[test]
    fn test_status_view_clean_tree() {
        let snapshot = WorkingTreeSnapshot {
            branch: BranchInfo::parse("main"),
            files: Vec::new(),
        };
        let selector = WorkingTreeSelector::new(&snapshot, SelectorMode::View);
        assert!(plain(&status_view(&selector)).contains("Working tree clean."));
    }

    #[test]
    fn test_suggestion_box_contains_message() {
        let out = plain(&suggestion_box("docs: update documentation"));
        assert!(out.contains("\u{2502}  docs: update documentation  \u{2502}"));
    }

    #[test]
    fn test_staged_list() {
        let out = plain(&staged_list(&["a.rs".to_string(), "b.rs".to_string()]));
        assert_eq!(out, "\u{2714} Staged 2 files:\n  + a.rs\n  + b.rs");
    }

    #[test]
    fn test_heatmap_has_seven_rows_and_legend() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let histogram: CommitCountHistogram = [(today, 3)].into_iter().collect();
        let out = plain(&heatmap(&HeatmapGrid::new(today), &histogram));

        for label in WEEKDAY_LABELS {
            assert!(out.contains(&format!("{label} ")));
        }
        assert!(out.contains("16+"));
        assert!(out.contains("3 commits in the last six months"));
    }
}
