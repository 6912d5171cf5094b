/// One checklist row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub path: String,
    pub checked: bool,
}

/// A command that changes which files are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommand {
    /// Flip the entry at this row
    ToggleAt(usize),
    CheckAll,
    UncheckAll,
    InvertAll,
}

/// Ordered checklist of input paths. Every path starts checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = paths
            .into_iter()
            .map(|p| SelectionEntry {
                path: p.into(),
                checked: true,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flips the entry for `path`. Returns false if the path is not in the list.
    pub fn toggle(&mut self, path: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    /// Flips the entry at `index`. Returns false if the index is out of range.
    pub fn toggle_at(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    pub fn check_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = true);
    }

    pub fn uncheck_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = false);
    }

    pub fn invert_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = !e.checked);
    }

    /// Runs a command. Returns true if any entry may have changed.
    pub fn apply(&mut self, command: &SelectionCommand) -> bool {
        match command {
            SelectionCommand::ToggleAt(index) => self.toggle_at(*index),
            SelectionCommand::CheckAll => {
                self.check_all();
                true
            }
            SelectionCommand::UncheckAll => {
                self.uncheck_all();
                true
            }
            SelectionCommand::InvertAll => {
                self.invert_all();
                true
            }
        }
    }

    pub fn is_checked(&self, path: &str) -> Option<bool> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.checked)
    }

    /// Checked paths, in input order
    pub fn current_selection(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.path.as_str())
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.checked).count()
    }
}
