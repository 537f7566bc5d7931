use std::fs;
use std::path::{Path, PathBuf};

use crate::debug_log;
use crate::error::StoreError;

const APP_DIR: &str = "digit-sweeper";
const BEST_SCORE_FILE: &str = "best_score";

/// Persistence for the fewest attempts across won games.
pub trait BestScoreStore {
    /// `None` means no record yet.
    fn get(&self) -> Option<u32>;
    fn set(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Keeps the best score for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self { best: Some(best) }
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self) -> Option<u32> {
        self.best
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = Some(score);
        Ok(())
    }
}

/// Stores the best score as a single decimal number in a text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    fn get(&self) -> Option<u32> {
        read_best_score(&self.path)
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        write_best_score(&self.path, score)
    }
}

/// Default location of the best-score file under the user's data directory.
#[must_use]
pub fn get_best_score_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(BEST_SCORE_FILE))
}

pub fn read_best_score(path: &Path) -> Option<u32> {
    let contents = fs::read_to_string(path).ok()?;
    match contents.trim().parse() {
        // Nobody wins in zero attempts.
        Ok(0) => None,
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("Ignoring unreadable best score in {}: {e}", path.display());
            None
        }
    }
}

pub fn write_best_score(path: &Path, score: u32) -> Result<(), StoreError> {
    let to_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, format!("{score}\n")).map_err(to_err)?;
    debug_log!("Best score {} written to {}", score, path.display());
    Ok(())
}
