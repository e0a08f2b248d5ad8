//! File browsing and multi-select over a working tree snapshot.

use std::collections::BTreeSet;

use crate::git::{BranchInfo, FileChange, WorkingTreeSnapshot};

/// How the selector is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMode {
    /// Read-only listing.
    View,
    /// Pick files to stage.
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPhase {
    Browsing,
    Done,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Up,
    Down,
    Toggle,
    ToggleAll,
    Confirm,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEffect {
    Stage { path: String },
}

/// Selected file indices. Always a subset of the selector's valid indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(BTreeSet<usize>);

impl SelectionSet {
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    fn toggle(&mut self, index: usize) {
        if !self.0.remove(&index) {
            self.0.insert(index);
        }
    }
}

/// Files partitioned for display, as indices into [`WorkingTreeSelector::files`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGroups {
    pub tracked: Vec<usize>,
    pub untracked: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingTreeSelector {
    branch: BranchInfo,
    files: Vec<FileChange>,
    mode: SelectorMode,
    cursor: usize,
    selected: SelectionSet,
    phase: SelectorPhase,
}

impl WorkingTreeSelector {
    /// Build a selector over `snapshot`.
    ///
    /// In [`SelectorMode::Add`] only files with unstaged changes are kept, so
    /// fully staged files cannot be staged again. Files are held in display
    /// order (tracked, then untracked) so cursor movement follows the screen.
    pub fn new(snapshot: &WorkingTreeSnapshot, mode: SelectorMode) -> Self {
        let (untracked, mut files): (Vec<FileChange>, Vec<FileChange>) = snapshot
            .files
            .iter()
            .filter(|f| mode == SelectorMode::View || f.has_unstaged_changes())
            .cloned()
            .partition(|f| f.untracked);
        files.extend(untracked);

        Self {
            branch: snapshot.branch.clone(),
            files,
            mode,
            cursor: 0,
            selected: SelectionSet::default(),
            phase: SelectorPhase::Browsing,
        }
    }

    pub fn branch(&self) -> &BranchInfo {
        &self.branch
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn mode(&self) -> SelectorMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    pub fn phase(&self) -> SelectorPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != SelectorPhase::Browsing
    }

    /// Paths of the selected files in index order.
    pub fn selected_paths(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|i| self.files.get(i))
            .map(|f| f.path.clone())
            .collect()
    }

    /// Tracked changes first, then untracked files, each in snapshot order.
    pub fn groups(&self) -> FileGroups {
        let (untracked, tracked): (Vec<usize>, Vec<usize>) =
            (0..self.files.len()).partition(|&i| self.files[i].untracked);
        FileGroups { tracked, untracked }
    }

    pub fn reduce(mut self, event: SelectorEvent) -> (Self, Vec<SelectorEffect>) {
        let mut effects = Vec::new();
        if self.is_terminal() {
            return (self, effects);
        }

        match event {
            SelectorEvent::Up => self.cursor = self.cursor.saturating_sub(1),
            SelectorEvent::Down => {
                if self.cursor + 1 < self.files.len() {
                    self.cursor += 1;
                }
            }
            SelectorEvent::Toggle => {
                if self.mode == SelectorMode::Add && self.cursor < self.files.len() {
                    self.selected.toggle(self.cursor);
                }
            }
            SelectorEvent::ToggleAll => {
                if self.mode == SelectorMode::Add {
                    if self.all_selected() {
                        self.selected = SelectionSet::default();
                    } else {
                        self.selected = SelectionSet((0..self.files.len()).collect());
                    }
                }
            }
            SelectorEvent::Confirm => {
                if self.mode == SelectorMode::Add {
                    self.phase = SelectorPhase::Done;
                    effects.extend(
                        self.selected_paths()
                            .into_iter()
                            .map(|path| SelectorEffect::Stage { path }),
                    );
                }
            }
            SelectorEvent::Quit => self.phase = SelectorPhase::Quit,
        }

        (self, effects)
    }

    /// Apply a sequence of events, collecting every effect.
    pub fn reduce_all(
        self,
        events: impl IntoIterator<Item = SelectorEvent>,
    ) -> (Self, Vec<SelectorEffect>) {
        let mut state = self;
        let mut effects = Vec::new();
        for event in events {
            if state.is_terminal() {
                break;
            }
            let (next, mut produced) = state.reduce(event);
            state = next;
            effects.append(&mut produced);
        }
        (state, effects)
    }

    fn all_selected(&self) -> bool {
        !self.files.is_empty() && self.selected.len() == self.files.len()
    }
}
