//! Contact store - name to number mapping persisted as a JSON snapshot

use crate::config::Config;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contact information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub number: String,
}

/// In-memory contact mapping backed by a single file.
///
/// Every mutation rewrites the whole file; there is no merge with whatever
/// is on disk, so edits made by another process in between are lost.
pub struct ContactStore {
    path: PathBuf,
    contacts: BTreeMap<String, String>,
}

impl ContactStore {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.contacts_file.clone(),
            contacts: BTreeMap::new(),
        }
    }

    /// Load contacts from disk, replacing the in-memory mapping.
    ///
    /// A missing file is an empty store. A file that does not parse is
    /// reported as [`Error::CorruptStore`] and left as is.
    pub fn load(&mut self) -> Result<usize> {
        if !self.path.exists() {
            self.contacts = BTreeMap::new();
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path)?;
        self.contacts = serde_json::from_str(&content).map_err(|source| Error::CorruptStore {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.contacts.len())
    }

    /// Save the full mapping to disk atomically
    pub fn save(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // Write to temp file in same directory (for atomic rename)
        let mut temp = NamedTempFile::new_in(parent)?;

        let json = serde_json::to_string_pretty(&self.contacts)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} contacts to {}", self.contacts.len(), self.path.display());
        Ok(())
    }

    /// Add or overwrite a contact and persist immediately.
    ///
    /// Returns the number previously stored under `name`, if any.
    pub fn add(&mut self, name: &str, number: &str) -> Result<Option<String>> {
        let previous = self.contacts.insert(name.to_string(), number.to_string());
        self.save()?;
        Ok(previous)
    }

    /// Get the number stored for a contact
    pub fn get(&self, name: &str) -> Option<&str> {
        self.contacts.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get) but a miss is an error
    pub fn lookup(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| Error::ContactNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contacts.contains_key(name)
    }

    /// All contacts, sorted by name
    pub fn contacts(&self) -> impl Iterator<Item = Contact> + '_ {
        self.contacts.iter().map(|(name, number)| Contact {
            name: name.clone(),
            number: number.clone(),
        })
    }

    /// Human-readable listing, one `name: number` line per contact
    pub fn listing(&self) -> String {
        if self.contacts.is_empty() {
            return "No contacts available.".to_string();
        }

        let mut out = String::from("Saved Contacts:");
        for contact in self.contacts() {
            out.push('\n');
            out.push_str(&format!("{}: {}", contact.name, contact.number));
        }
        out
    }

    /// Raw mapping, as persisted
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.contacts
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
