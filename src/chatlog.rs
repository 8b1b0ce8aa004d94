//! Chat log writer - append-only text logs per contact and direction
//!
//! Each (contact, direction) pair gets its own file under the chat
//! directory. Lines are only ever appended; an outgoing line and the reply
//! that follows it are two independent writes.

use crate::config::Config;
use crate::error::Result;
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Longest encoded contact name used verbatim in a file name
pub const MAX_STEM_LEN: usize = 200;

/// Encoded prefix kept when a name is too long; a hash suffix follows
const TRUNCATED_STEM_LEN: usize = 180;

/// Who wrote a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sent by the user
    Outgoing,
    /// Sent by the simulated contact
    Incoming,
}

impl Direction {
    /// Tag used in the log file name
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Outgoing => "you",
            Direction::Incoming => "them",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Writer for the per-contact chat logs
pub struct ChatLog {
    dir: PathBuf,
}

impl ChatLog {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.chats_dir.clone(),
        }
    }

    /// Path of the log for a contact and direction
    pub fn path_for(&self, contact: &str, direction: Direction) -> PathBuf {
        self.dir
            .join(format!("{}_{}.txt", file_stem(contact), direction))
    }

    /// Append `text` as one line to a contact's log
    pub fn append(&self, contact: &str, text: &str, direction: Direction) -> Result<PathBuf> {
        let path = self.path_for(contact, direction);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", text)?;

        tracing::debug!("Saved message to {}", path.display());
        Ok(path)
    }

    /// All lines of one log, oldest first. A missing log is empty.
    pub fn read_lines(&self, contact: &str, direction: Direction) -> Result<Vec<String>> {
        let path = self.path_for(contact, direction);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// File name stem for a contact.
///
/// ASCII letters, digits, space, `.` and `-` are kept; every other byte
/// becomes `%XX`, so distinct names never share a stem. Stems longer than
/// [`MAX_STEM_LEN`] are cut and end in `~` plus a SHA-256 prefix of the
/// full name (`~` is always escaped otherwise).
pub fn file_stem(contact: &str) -> String {
    let mut stem = String::with_capacity(contact.len());
    for b in contact.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b' ' | b'.' | b'-' => stem.push(b as char),
            _ => stem.push_str(&format!("%{:02X}", b)),
        }
    }

    if stem.len() > MAX_STEM_LEN {
        let digest = Sha256::digest(contact.as_bytes());
        // Stem is pure ASCII here, so any byte index is a char boundary
        stem.truncate(TRUNCATED_STEM_LEN);
        stem.push('~');
        stem.push_str(&hex::encode(&digest[..8]));
    }
    stem
}
