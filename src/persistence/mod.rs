//! Line-oriented high score storage
//!
//! The save format is plain text, one decimal integer per line. Stores never
//! fail loudly: a read that cannot produce lines yields `None`, a write that
//! cannot complete yields `false`, and both are logged.

use std::fs;
use std::path::{Path, PathBuf};

/// Backing store for the high score lines
pub trait ScoreStore {
    /// Stored lines, or `None` when nothing readable is stored
    fn read_lines(&self) -> Option<Vec<String>>;

    /// Replace the stored lines. Returns true on success.
    fn write_lines(&mut self, lines: &[String]) -> bool;
}

/// A save file on disk
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for SaveFile {
    fn read_lines(&self) -> Option<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents.lines().map(str::to_owned).collect()),
            Err(err) => {
                log::info!("No save file at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn write_lines(&mut self, lines: &[String]) -> bool {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(dir)
        {
            log::warn!("Could not create save directory {}: {}", dir.display(), err);
            return false;
        }

        let mut contents = lines.join("\n");
        contents.push('\n');
        match fs::write(&self.path, contents) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Could not write {}: {}", self.path.display(), err);
                false
            }
        }
    }
}

/// In-memory store, handy for tests and for running without a disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub lines: Option<Vec<String>>,
    /// Make every write fail
    pub read_only: bool,
}

impl MemoryStore {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: Some(lines.iter().map(|line| line.to_string()).collect()),
            read_only: false,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn read_lines(&self) -> Option<Vec<String>> {
        self.lines.clone()
    }

    fn write_lines(&mut self, lines: &[String]) -> bool {
        if self.read_only {
            return false;
        }
        self.lines = Some(lines.to_vec());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("time-attack-test-{}", std::process::id()))
            .join(name)
            .join("TimeAttack.sav")
    }

    #[test]
    fn test_save_file_round_trip() {
        let path = scratch_path("round-trip");
        let mut file = SaveFile::new(&path);
        assert!(file.write_lines(&["12".to_string(), "4".to_string()]));
        assert_eq!(file.read_lines(), Some(vec!["12".to_string(), "4".to_string()]));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_reads_none() {
        let file = SaveFile::new(scratch_path("missing"));
        assert_eq!(file.read_lines(), None);
    }

    #[test]
    fn test_unwritable_path_returns_false() {
        // A regular file cannot act as a directory
        let blocker = scratch_path("blocker");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "x").unwrap();
        let mut file = SaveFile::new(blocker.join("TimeAttack.sav"));
        assert!(!file.write_lines(&["1".to_string()]));
        let _ = fs::remove_dir_all(blocker.parent().unwrap());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.read_lines(), None);
        assert!(store.write_lines(&["3".to_string()]));
        assert_eq!(store.read_lines(), Some(vec!["3".to_string()]));

        store.read_only = true;
        assert!(!store.write_lines(&["9".to_string()]));
        assert_eq!(store.read_lines(), Some(vec!["3".to_string()]));
    }
}
