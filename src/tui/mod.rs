//! Interactive terminal screens built on ratatui and crossterm.
//!
//! Each screen wraps one of the pure state machines: a key press is mapped to
//! an event, the machine reduces it, and the frame is redrawn. The terminal is
//! restored on every exit path, including errors.

pub mod keys;
pub mod ui;

use std::convert::Infallible;
use std::io::{self, IsTerminal};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use tracing::debug;

use crate::commit::{CommitComposer, ComposerEffect, Interaction};
use crate::error::UiError;
use crate::stage::{SelectorEffect, WorkingTreeSelector};
use crate::stats::ContributionCalendar;

/// A state machine that can be driven from key presses.
trait Screen: Sized {
    type Effect;

    fn handle_key(self, key: KeyEvent) -> (Self, Vec<Self::Effect>);

    fn is_done(&self) -> bool;

    fn draw(&self, f: &mut Frame);
}

impl Screen for WorkingTreeSelector {
    type Effect = SelectorEffect;

    fn handle_key(self, key: KeyEvent) -> (Self, Vec<SelectorEffect>) {
        match keys::selector_event(key) {
            Some(event) => self.reduce(event),
            None => (self, Vec::new()),
        }
    }

    fn is_done(&self) -> bool {
        self.is_terminal()
    }

    fn draw(&self, f: &mut Frame) {
        ui::render_selector(f, self);
    }
}

impl Screen for CommitComposer {
    type Effect = ComposerEffect;

    fn handle_key(self, key: KeyEvent) -> (Self, Vec<ComposerEffect>) {
        match keys::composer_event(&self, key) {
            Some(event) => self.reduce(event),
            None => (self, Vec::new()),
        }
    }

    fn is_done(&self) -> bool {
        self.is_terminal()
    }

    fn draw(&self, f: &mut Frame) {
        ui::render_composer(f, self);
    }
}

impl Screen for ContributionCalendar {
    type Effect = Infallible;

    fn handle_key(self, key: KeyEvent) -> (Self, Vec<Infallible>) {
        match keys::calendar_event(key) {
            Some(event) => (self.reduce(event), Vec::new()),
            None => (self, Vec::new()),
        }
    }

    fn is_done(&self) -> bool {
        self.is_terminal()
    }

    fn draw(&self, f: &mut Frame) {
        ui::render_calendar(f, self);
    }
}

fn event_loop<S: Screen>(
    terminal: &mut DefaultTerminal,
    mut screen: S,
) -> Result<(S, Vec<S::Effect>), UiError> {
    let mut effects = Vec::new();

    while !screen.is_done() {
        terminal
            .draw(|f| screen.draw(f))
            .map_err(UiError::Terminal)?;

        match event::read().map_err(UiError::Terminal)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let (next, mut produced) = screen.handle_key(key);
                screen = next;
                effects.append(&mut produced);
            }
            _ => {}
        }
    }

    Ok((screen, effects))
}

/// Run `screen` on the alternate screen until it reaches a terminal state.
fn run_screen<S: Screen>(screen: S) -> Result<(S, Vec<S::Effect>), UiError> {
    if !io::stdout().is_terminal() {
        return Err(UiError::NotATerminal);
    }

    let mut terminal = ratatui::try_init().map_err(UiError::Terminal)?;
    let result = event_loop(&mut terminal, screen);
    ratatui::restore();

    result
}

/// [`Interaction`] backed by the real terminal.
#[derive(Debug, Default)]
pub struct TerminalInteraction;

impl Interaction for TerminalInteraction {
    fn select_files(
        &mut self,
        selector: WorkingTreeSelector,
    ) -> Result<(WorkingTreeSelector, Vec<SelectorEffect>), UiError> {
        debug!("Opening file selector with {} file(s)", selector.files().len());
        run_screen(selector)
    }

    fn compose(
        &mut self,
        composer: CommitComposer,
    ) -> Result<(CommitComposer, Vec<ComposerEffect>), UiError> {
        run_screen(composer)
    }
}

/// Browse the contribution calendar until the user quits.
pub fn browse_calendar(calendar: ContributionCalendar) -> Result<(), UiError> {
    run_screen(calendar).map(|_| ())
}
