//! Checklist state machine
//!
//! The controller owns the selection and the focused row, reacts to one key at a
//! time and keeps the footer totals in step with the selection. It knows nothing
//! about the terminal: the caller feeds it keys and draws from its state.

use crate::domain::{aggregate, totals, AggregateResult, FileRecords, Selection, Totals};
use crate::tui::input::{handle_key_event, KeyAction};
use crossterm::event::{KeyEvent, KeyEventKind};
use std::io;
use tracing::debug;

/// Screen or terminal state of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    /// Checklist with live totals
    Main,
    /// Key binding reference
    Help,
    /// Selection finalized
    Committed(AggregateResult),
    /// User cancelled, nothing to deliver
    Aborted,
}

impl ControllerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerState::Committed(_) | ControllerState::Aborted)
    }
}

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(AggregateResult),
    Aborted,
}

pub struct Controller<'a> {
    records: &'a FileRecords,
    selection: Selection,
    focus: usize,
    totals: Totals,
    state: ControllerState,
}

impl<'a> Controller<'a> {
    /// Starts on the main screen with every file checked
    pub fn new(records: &'a FileRecords) -> Self {
        let selection = Selection::new(records.paths());
        let totals = totals(&selection.current_selection(), records);
        Self {
            records,
            selection,
            focus: 0,
            totals,
            state: ControllerState::Main,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn records(&self) -> &FileRecords {
        self.records
    }

    /// Index of the focused row
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Totals over the currently checked files
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Handles one key press. Releases and repeats are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> &ControllerState {
        if key.kind != KeyEventKind::Press {
            return &self.state;
        }
        self.handle_action(handle_key_event(key))
    }

    /// Applies an action to the current state
    pub fn handle_action(&mut self, action: KeyAction) -> &ControllerState {
        if self.state.is_terminal() {
            return &self.state;
        }

        if self.state == ControllerState::Help {
            // Any key leaves help without touching the selection
            self.state = ControllerState::Main;
        } else {
            self.handle_main(action);
        }
        &self.state
    }

    fn handle_main(&mut self, action: KeyAction) {
        if let Some(command) = action.selection_command(self.focus) {
            if self.selection.apply(&command) {
                self.refresh_totals();
            }
            return;
        }

        match action {
            KeyAction::Commit => {
                let result = aggregate(&self.selection.current_selection(), self.records);
                debug!(
                    files = result.file_count,
                    tokens = result.token_count,
                    "selection committed"
                );
                self.state = ControllerState::Committed(result);
            }
            KeyAction::Quit => {
                debug!("selection aborted");
                self.state = ControllerState::Aborted;
            }
            KeyAction::Help => self.state = ControllerState::Help,
            KeyAction::Next => self.next(),
            KeyAction::Previous => self.previous(),
            KeyAction::First => self.focus = 0,
            KeyAction::Last => self.focus = self.selection.len().saturating_sub(1),
            _ => {}
        }
    }

    fn next(&mut self) {
        if self.focus < self.selection.len().saturating_sub(1) {
            self.focus += 1;
        }
    }

    fn previous(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
        }
    }

    fn refresh_totals(&mut self) {
        self.totals = totals(&self.selection.current_selection(), self.records);
    }

    /// Consumes the controller once it has reached a terminal state
    pub fn into_outcome(self) -> Option<Outcome> {
        match self.state {
            ControllerState::Committed(result) => Some(Outcome::Committed(result)),
            ControllerState::Aborted => Some(Outcome::Aborted),
            _ => None,
        }
    }

    /// Drives the controller until it commits or aborts.
    ///
    /// `draw` is called before every read and `next_key` blocks until the terminal
    /// has something for us. `Ok(None)` asks for a redraw only (a resize) and never
    /// reaches the state machine. Only I/O errors from the callbacks are returned.
    pub fn run<K, D>(mut self, mut next_key: K, mut draw: D) -> io::Result<Outcome>
    where
        K: FnMut() -> io::Result<Option<KeyEvent>>,
        D: FnMut(&Controller<'a>) -> io::Result<()>,
    {
        loop {
            draw(&self)?;
            let Some(key) = next_key()? else {
                continue;
            };
            self.handle_key(key);

            if self.is_finished() {
                return Ok(self.into_outcome().unwrap_or(Outcome::Aborted));
            }
        }
    }
}
