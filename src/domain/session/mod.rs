//! Clip selection session
//!
//! One `SelectionSession` per task. It owns the candidate list, each
//! candidate's checkbox flag and preview status, and the workflow state:
//!
//! ```text
//! NoSession -> Downloading -> AwaitingSelection <-> Confirmed
//!     ^             |
//!     +-------------+  (download failed)
//! ```
//!
//! Every mutator here is pure bookkeeping; ports are driven by
//! `app::selection_interactor`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::rules::SelectionRules;

/// Workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    NoSession,
    Downloading,
    AwaitingSelection,
    Confirmed,
}

impl SelectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionState::NoSession => "no_session",
            SelectionState::Downloading => "downloading",
            SelectionState::AwaitingSelection => "awaiting_selection",
            SelectionState::Confirmed => "confirmed",
        }
    }
}

/// Preview outcome for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PreviewStatus {
    /// Not attempted yet
    Pending,
    Ready(PathBuf),
    Unavailable(String),
}

/// One downloaded candidate clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub path: PathBuf,
    pub selected: bool,
    pub preview: PreviewStatus,
}

/// Preview content of a grid cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellPreview {
    Ready { path: PathBuf, bytes_len: usize },
    Pending,
    Error { message: String },
}

/// One cell of the selection grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub index: usize,
    pub path: PathBuf,
    pub selected: bool,
    pub preview: CellPreview,
}

/// Fixed-column layout of the candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionGrid {
    pub generation: u64,
    pub columns: usize,
    pub rows: Vec<Vec<GridCell>>,
}

impl SelectionGrid {
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        for cell in self.rows.iter_mut().flatten() {
            if cell.index == index {
                cell.selected = selected;
            }
        }
    }
}

/// Per-task selection session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSession {
    pub task_id: String,
    pub state: SelectionState,
    pub entries: Vec<SelectionEntry>,
    pub confirmed: Option<Vec<PathBuf>>,
    pub download_attempts: u32,
    pub grid_generation: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    preview_bytes: HashMap<PathBuf, Arc<Vec<u8>>>,
    #[serde(skip)]
    grid: Option<SelectionGrid>,
}

impl SelectionSession {
    pub fn new(task_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            task_id: task_id.into(),
            state: SelectionState::NoSession,
            entries: Vec::new(),
            confirmed: None,
            download_attempts: 0,
            grid_generation: 0,
            created_at: now,
            updated_at: now,
            preview_bytes: HashMap::new(),
            grid: None,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn expect_state(&self, expected: SelectionState, action: &str) -> Result<(), DomainError> {
        if self.state != expected {
            return Err(DomainError::InvalidState(format!(
                "cannot {} while session {} is {}",
                action,
                self.task_id,
                self.state.as_str()
            )));
        }
        Ok(())
    }

    /// Whether candidates have been downloaded
    pub fn has_candidates(&self) -> bool {
        matches!(
            self.state,
            SelectionState::AwaitingSelection | SelectionState::Confirmed
        )
    }

    /// NoSession -> Downloading
    pub fn begin_download(&mut self) -> Result<(), DomainError> {
        self.expect_state(SelectionState::NoSession, "start a download")?;
        self.state = SelectionState::Downloading;
        self.download_attempts += 1;
        self.touch();
        Ok(())
    }

    /// Downloading -> AwaitingSelection, every candidate checked by default
    pub fn complete_download(
        &mut self,
        paths: Vec<PathBuf>,
        default_selected: bool,
    ) -> Result<(), DomainError> {
        self.expect_state(SelectionState::Downloading, "complete a download")?;
        self.entries = SelectionRules::collapse_duplicates(paths)
            .into_iter()
            .map(|path| SelectionEntry {
                path,
                selected: default_selected,
                preview: PreviewStatus::Pending,
            })
            .collect();
        self.state = SelectionState::AwaitingSelection;
        self.invalidate_grid();
        self.touch();
        Ok(())
    }

    /// Downloading -> NoSession
    pub fn abort_download(&mut self) {
        if self.state == SelectionState::Downloading {
            self.state = SelectionState::NoSession;
            self.touch();
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut SelectionEntry, DomainError> {
        let total = self.entries.len();
        self.entries.get_mut(index).ok_or_else(|| {
            DomainError::BadArgs(format!(
                "Video index {} out of range (1-{})",
                index + 1,
                total
            ))
        })
    }

    /// Set one checkbox. Returns whether the flag changed.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<bool, DomainError> {
        self.expect_state(SelectionState::AwaitingSelection, "change the selection")?;
        let entry = self.entry_mut(index)?;
        let changed = entry.selected != selected;
        entry.selected = selected;
        if changed {
            if let Some(grid) = self.grid.as_mut() {
                grid.set_selected(index, selected);
            }
            self.touch();
        }
        Ok(changed)
    }

    /// Flip one checkbox and return the new value
    pub fn toggle(&mut self, index: usize) -> Result<bool, DomainError> {
        self.expect_state(SelectionState::AwaitingSelection, "change the selection")?;
        let selected = !self.entry_mut(index)?.selected;
        self.set_selected(index, selected)?;
        Ok(selected)
    }

    /// Set every checkbox to `selected`
    pub fn set_all(&mut self, selected: bool) -> Result<(), DomainError> {
        self.expect_state(SelectionState::AwaitingSelection, "change the selection")?;
        for index in 0..self.entries.len() {
            self.set_selected(index, selected)?;
        }
        Ok(())
    }

    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| entry.path.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.selected).count()
    }

    /// AwaitingSelection -> Confirmed. Zero selected clips leave the state untouched.
    pub fn confirm(&mut self) -> Result<Vec<PathBuf>, DomainError> {
        if self.state == SelectionState::Confirmed {
            if let Some(confirmed) = &self.confirmed {
                return Ok(confirmed.clone());
            }
        }
        self.expect_state(SelectionState::AwaitingSelection, "confirm the selection")?;

        let selected = self.selected_paths();
        if selected.is_empty() {
            return Err(DomainError::NoSelection);
        }

        self.confirmed = Some(selected.clone());
        self.state = SelectionState::Confirmed;
        self.touch();
        Ok(selected)
    }

    /// Confirmed -> AwaitingSelection, keeping the checkbox flags
    pub fn reopen(&mut self) -> Result<(), DomainError> {
        self.expect_state(SelectionState::Confirmed, "reopen the selection")?;
        self.confirmed = None;
        self.state = SelectionState::AwaitingSelection;
        self.touch();
        Ok(())
    }

    /// Record a preview outcome for one candidate
    pub fn record_preview(&mut self, index: usize, status: PreviewStatus) -> Result<(), DomainError> {
        self.entry_mut(index)?.preview = status;
        self.invalidate_grid();
        self.touch();
        Ok(())
    }

    /// Indices whose preview has not been attempted
    pub fn pending_previews(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.preview == PreviewStatus::Pending)
            .map(|(index, _)| index)
            .collect()
    }

    /// Drop the cached grid and preview bytes so the next render rebuilds them
    pub fn refresh(&mut self) -> u64 {
        self.preview_bytes.clear();
        self.invalidate_grid();
        self.touch();
        self.grid_generation
    }

    fn invalidate_grid(&mut self) {
        self.grid = None;
        self.grid_generation += 1;
    }

    pub fn cached_grid(&self, columns: usize) -> Option<&SelectionGrid> {
        self.grid
            .as_ref()
            .filter(|grid| grid.columns == columns && grid.generation == self.grid_generation)
    }

    pub fn store_grid(&mut self, grid: SelectionGrid) {
        self.grid = Some(grid);
    }

    pub fn cached_preview_bytes(&self, path: &Path) -> Option<Arc<Vec<u8>>> {
        self.preview_bytes.get(path).cloned()
    }

    pub fn cache_preview_bytes(&mut self, path: PathBuf, bytes: Arc<Vec<u8>>) {
        self.preview_bytes.insert(path, bytes);
    }
}
