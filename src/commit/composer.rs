//! Review/edit/decide state machine for a proposed commit message.
//!
//! The composer is a pure reducer: [`CommitComposer::reduce`] consumes one
//! event and returns the next state plus the effects the caller must run.

/// Actions offered while navigating, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Apply,
    Edit,
    Cancel,
}

impl ComposerAction {
    pub const ALL: [ComposerAction; 3] = [
        ComposerAction::Apply,
        ComposerAction::Edit,
        ComposerAction::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComposerAction::Apply => "Apply",
            ComposerAction::Edit => "Edit",
            ComposerAction::Cancel => "Cancel",
        }
    }

    fn index(self) -> usize {
        match self {
            ComposerAction::Apply => 0,
            ComposerAction::Edit => 1,
            ComposerAction::Cancel => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The user's final say on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    /// Still deciding.
    None,
    Apply,
    /// Applied after at least one committed edit.
    EditAndApply,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerPhase {
    Navigating,
    Editing { buffer: String },
    Applied,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    Prev,
    Next,
    Activate,
    /// Leave immediately without committing.
    Quit,
    Insert(char),
    Backspace,
    ClearBuffer,
    CommitEdit,
    AbortEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEffect {
    Commit { message: String },
}

/// Maximum characters the user may add on top of the text the editor opens with.
pub const MAX_EDIT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitComposer {
    message: String,
    cursor: ComposerAction,
    phase: ComposerPhase,
    edited: bool,
}

impl CommitComposer {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            message: suggestion.into(),
            cursor: ComposerAction::Apply,
            phase: ComposerPhase::Navigating,
            edited: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cursor(&self) -> ComposerAction {
        self.cursor
    }

    pub fn phase(&self) -> &ComposerPhase {
        &self.phase
    }

    /// Text currently being edited, if in the editing phase.
    pub fn buffer(&self) -> Option<&str> {
        match &self.phase {
            ComposerPhase::Editing { buffer } => Some(buffer),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, ComposerPhase::Applied | ComposerPhase::Cancelled)
    }

    pub fn decision(&self) -> CommitDecision {
        match self.phase {
            ComposerPhase::Applied if self.edited => CommitDecision::EditAndApply,
            ComposerPhase::Applied => CommitDecision::Apply,
            ComposerPhase::Cancelled => CommitDecision::Cancel,
            _ => CommitDecision::None,
        }
    }

    pub fn reduce(mut self, event: ComposerEvent) -> (Self, Vec<ComposerEffect>) {
        let mut effects = Vec::new();

        match std::mem::replace(&mut self.phase, ComposerPhase::Navigating) {
            ComposerPhase::Navigating => match event {
                ComposerEvent::Prev => self.cursor = self.cursor.prev(),
                ComposerEvent::Next => self.cursor = self.cursor.next(),
                ComposerEvent::Quit => self.phase = ComposerPhase::Cancelled,
                ComposerEvent::Activate => match self.cursor {
                    ComposerAction::Apply => {
                        self.phase = ComposerPhase::Applied;
                        effects.push(ComposerEffect::Commit {
                            message: self.message.clone(),
                        });
                    }
                    ComposerAction::Edit => {
                        self.cursor = ComposerAction::Apply;
                        self.phase = ComposerPhase::Editing {
                            buffer: self.message.clone(),
                        };
                    }
                    ComposerAction::Cancel => self.phase = ComposerPhase::Cancelled,
                },
                // Edit keys mean nothing outside the editor
                _ => {}
            },
            ComposerPhase::Editing { mut buffer } => match event {
                ComposerEvent::Insert(c) => {
                    let limit = self.message.chars().count() + MAX_EDIT_CHARS;
                    if !c.is_control() && buffer.chars().count() < limit {
                        buffer.push(c);
                    }
                    self.phase = ComposerPhase::Editing { buffer };
                }
                ComposerEvent::Backspace => {
                    buffer.pop();
                    self.phase = ComposerPhase::Editing { buffer };
                }
                ComposerEvent::ClearBuffer => {
                    self.phase = ComposerPhase::Editing {
                        buffer: String::new(),
                    };
                }
                ComposerEvent::CommitEdit => {
                    // A blank buffer never replaces the message
                    let trimmed = buffer.trim();
                    if !trimmed.is_empty() && trimmed != self.message {
                        self.message = trimmed.to_string();
                        self.edited = true;
                    }
                }
                ComposerEvent::AbortEdit | ComposerEvent::Quit => {}
                ComposerEvent::Prev | ComposerEvent::Next | ComposerEvent::Activate => {
                    self.phase = ComposerPhase::Editing { buffer };
                }
            },
            terminal @ (ComposerPhase::Applied | ComposerPhase::Cancelled) => {
                self.phase = terminal;
            }
        }

        (self, effects)
    }

    /// Apply a sequence of events, collecting every effect.
    pub fn reduce_all(
        self,
        events: impl IntoIterator<Item = ComposerEvent>,
    ) -> (Self, Vec<ComposerEffect>) {
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
}
