//! Configuration and paths

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted contact mapping
pub const CONTACTS_FILE_NAME: &str = "contacts.json";

/// Directory holding per-contact chat logs
pub const CHATS_DIR_NAME: &str = "chats";

/// All configurable paths
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub contacts_file: PathBuf,
    pub chats_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_dir(".")
    }
}

impl Config {
    /// Lay out the contact file and chat directory under `data_dir`
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            contacts_file: data_dir.join(CONTACTS_FILE_NAME),
            chats_dir: data_dir.join(CHATS_DIR_NAME),
            data_dir,
        }
    }

    /// Create config for testing with custom paths
    pub fn for_test(temp_dir: &Path) -> Self {
        Self::with_data_dir(temp_dir)
    }

    /// Create the data and chat directories if missing.
    ///
    /// Returns `true` when the chat directory did not exist before.
    pub fn ensure_dirs(&self) -> Result<bool> {
        ensure_dir(&self.data_dir)?;
        let created = !self.chats_dir.exists();
        ensure_dir(&self.chats_dir)?;
        Ok(created)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::Config(format!(
            "{} exists but is not a directory",
            path.display()
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert!(config.contacts_file.ends_with("contacts.json"));
        assert!(config.chats_dir.ends_with("chats"));
    }

    #[test]
    fn test_test_config() {
        let temp = std::env::temp_dir();
        let config = Config::for_test(&temp);
        assert_eq!(config.data_dir, temp);
        assert_eq!(config.contacts_file, temp.join(CONTACTS_FILE_NAME));
    }

    #[test]
    fn test_ensure_dirs_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_data_dir(temp_dir.path().join("nested"));

        assert!(config.ensure_dirs().unwrap());
        assert!(config.chats_dir.is_dir());

        // Second call finds it in place
        assert!(!config.ensure_dirs().unwrap());
    }

    #[test]
    fn test_ensure_dirs_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::for_test(temp_dir.path());
        fs::write(&config.chats_dir, "not a dir").unwrap();

        let err = config.ensure_dirs().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
