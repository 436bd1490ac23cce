use crate::error::{GitcalError, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = ".gitlocalstats";

/// Newline-delimited list of repository paths, one per line.
pub struct RepoStore {
    path: PathBuf,
}

impl RepoStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `path`, or `~/.gitlocalstats` if `None`.
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Ok(Self::new(p)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(STORE_FILE_NAME))
            .ok_or(GitcalError::NoHomeDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored paths in file order. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no repository list at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(GitcalError::at_path(&self.path, e)),
        };

        Ok(content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    pub fn save(&self, repos: &[PathBuf]) -> Result<()> {
        let content = repos
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, content).map_err(|e| GitcalError::at_path(&self.path, e))
    }

    /// Merges `found` into the stored list and writes it back.
    /// Returns the paths that were not already stored.
    pub fn add(&self, found: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let existing = self.load()?;
        let before = existing.len();
        let merged = merge(existing, found);
        let added = merged[before..].to_vec();
        self.save(&merged)?;
        Ok(added)
    }
}

/// `existing` followed by every path of `new` not already present.
pub fn merge(mut existing: Vec<PathBuf>, new: &[PathBuf]) -> Vec<PathBuf> {
    for path in new {
        if !existing.contains(path) {
            existing.push(path.clone());
        }
    }
    existing
}
