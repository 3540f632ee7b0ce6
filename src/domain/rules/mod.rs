// Domain rules - Business logic and policies

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::utils::path::truncate_chars;

/// Naming and duration rules for cached previews
pub struct PreviewRules;

impl PreviewRules {
    /// Preview file name derived from the source stem, truncated to `max_chars` characters
    pub fn preview_file_name(source: &Path, max_chars: usize) -> Result<String, DomainError> {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                DomainError::BadArgs(format!("Source has no file name: {}", source.display()))
            })?;

        Ok(format!("preview_{}.mp4", truncate_chars(&stem, max_chars)))
    }

    /// Seconds to encode: the whole source when shorter than the cap
    pub fn preview_duration(source_duration: f64, max_duration: f64) -> Result<f64, DomainError> {
        if !max_duration.is_finite() || max_duration <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Preview length must be positive, got {}",
                max_duration
            )));
        }
        if !source_duration.is_finite() || source_duration <= 0.0 {
            return Err(DomainError::ProbeFail(format!(
                "Source duration must be positive, got {}",
                source_duration
            )));
        }
        Ok(source_duration.min(max_duration))
    }
}

/// Rules for task identifiers used as directory and file names
pub struct TaskIdRules;

impl TaskIdRules {
    pub const MAX_LEN: usize = 64;

    pub fn validate(task_id: &str) -> Result<(), DomainError> {
        if task_id.is_empty() || task_id.len() > Self::MAX_LEN {
            return Err(DomainError::BadArgs(format!(
                "Task id must be 1-{} characters",
                Self::MAX_LEN
            )));
        }
        if !task_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::BadArgs(format!(
                "Task id may only contain letters, digits, '-' and '_': {}",
                task_id
            )));
        }
        Ok(())
    }
}

/// Rules applied to the candidate list returned by the material collaborator
pub struct SelectionRules;

impl SelectionRules {
    /// Drop repeated paths, keeping the first occurrence
    pub fn collapse_duplicates(paths: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        paths
            .into_iter()
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// Normalize user search terms: trimmed, non-empty, deduplicated
    pub fn normalize_terms(terms: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        terms
            .iter()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty())
            .filter(|term| seen.insert(term.to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests;
