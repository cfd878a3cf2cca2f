//! Tournament directory loader
//!
//! A tournament is a directory holding one text file per match.

use std::path::{Path, PathBuf};

use super::MatchSource;
use crate::{MatchRecord, MvpError, Result};

/// Loads every match file of a tournament directory
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
}

impl DirectoryLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectoryLoader {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> MvpError {
        MvpError::InvalidInputSource {
            path: self.dir.clone(),
            reason: reason.into(),
        }
    }

    /// Regular files of the directory, sorted by file name
    pub fn match_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            let reason = if self.dir.exists() {
                "not a directory"
            } else {
                "no such path"
            };
            return Err(self.invalid(reason));
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| self.invalid(e.to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            } else {
                log::debug!("Skipping {}", path.display());
            }
        }
        files.sort();
        Ok(files)
    }
}

impl MatchSource for DirectoryLoader {
    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }

    fn load(&self) -> Result<Vec<MatchRecord>> {
        let files = self.match_files()?;
        let mut records = Vec::with_capacity(files.len());

        for path in files {
            log::info!("Reading {}", path.display());
            let text = std::fs::read_to_string(&path)?;
            records.push(MatchRecord::from_text(path.display().to_string(), &text));
        }

        Ok(records)
    }
}
