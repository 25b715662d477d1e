//! Transcript Export
//!
//! Plain-text session log, one block per message:
//!
//! ```text
//! [user] 2025-03-01T10:15:00.000000
//! How should we respond?
//!
//! [assistant] 2025-03-01T10:15:04.512000
//! Honourable chair, ...
//!
//! ```

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::types::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: Role, timestamp: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self {
            role,
            timestamp,
            content: content.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "[{}] {}\n{}\n\n",
            self.role,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.content
        )
    }
}

pub fn render(entries: &[TranscriptEntry]) -> String {
    entries.iter().map(TranscriptEntry::render).collect()
}

/// Append entries to `path`, creating the file if needed
pub fn append(path: &Path, entries: &[TranscriptEntry]) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render(entries).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, secs).unwrap()
    }

    #[test]
    fn test_entry_format() {
        let entry = TranscriptEntry::new(Role::User, at(0), "What is a caucus?");
        assert_eq!(
            entry.render(),
            "[user] 2025-03-01T10:15:00.000000\nWhat is a caucus?\n\n"
        );
    }

    #[test]
    fn test_append_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mun_chat_history.txt");

        append(&path, &[TranscriptEntry::new(Role::User, at(0), "q1")]).unwrap();
        append(
            &path,
            &[TranscriptEntry::new(Role::Assistant, at(4), "a1")],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[user] 2025-03-01T10:15:00.000000\nq1\n\n[assistant] 2025-03-01T10:15:04.000000\na1\n\n"
        );
    }
}
