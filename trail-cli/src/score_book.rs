//! JSON file of finished and failed journeys.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trail_game::{Milestone, MilestoneRecorder};

#[derive(Debug, Error)]
pub enum ScoreBookError {
    #[error("score book I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score book is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub seed: u64,
    #[serde(flatten)]
    pub milestone: Milestone,
}

/// Milestones for every run, persisted as a JSON array when a path is set.
#[derive(Debug, Default)]
pub struct JsonScoreBook {
    path: Option<PathBuf>,
    seed: u64,
    entries: Vec<ScoreEntry>,
}

impl JsonScoreBook {
    /// A score book that is never written to disk.
    #[must_use]
    pub fn in_memory(seed: u64) -> Self {
        Self {
            path: None,
            seed,
            entries: Vec::new(),
        }
    }

    /// Open (or start) the score book at `path`.
    ///
    /// # Errors
    ///
    /// Fails when an existing file cannot be read or parsed.
    pub fn open(path: &Path, seed: u64) -> Result<Self, ScoreBookError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(ScoreBookError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            seed,
            entries,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    fn save(&self) -> Result<(), ScoreBookError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json).map_err(|source| ScoreBookError::Io {
            path: path.clone(),
            source,
        })
    }
}

impl MilestoneRecorder for JsonScoreBook {
    type Error = ScoreBookError;

    fn record_milestone(&mut self, milestone: &Milestone) -> Result<(), ScoreBookError> {
        self.entries.push(ScoreEntry {
            seed: self.seed,
            milestone: milestone.clone(),
        });
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrival() -> Milestone {
        Milestone::ReachedDestination {
            leader: "Ezra".to_string(),
            date: "September 3, 1848".to_string(),
            survivors: 3,
            cash_cents: 12_345,
        }
    }

    #[test]
    fn entries_accumulate_across_opens() {
        let path = std::env::temp_dir().join(format!("trail-scores-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut book = JsonScoreBook::open(&path, 1).unwrap();
        book.record_milestone(&arrival()).unwrap();
        let mut book = JsonScoreBook::open(&path, 2).unwrap();
        book.record_milestone(&arrival()).unwrap();

        let reopened = JsonScoreBook::open(&path, 3).unwrap();
        assert_eq!(reopened.entries().len(), 2);
        assert_eq!(reopened.entries()[1].seed, 2);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"milestone\": \"reached_destination\""));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn garbage_files_are_rejected() {
        let path = std::env::temp_dir().join(format!("trail-bad-scores-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonScoreBook::open(&path, 1),
            Err(ScoreBookError::Json(_))
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn in_memory_book_keeps_entries() {
        let mut book = JsonScoreBook::in_memory(9);
        book.record_milestone(&arrival()).unwrap();
        assert_eq!(book.entries().len(), 1);
    }
}
