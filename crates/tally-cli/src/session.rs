//! Session scratch file.
//!
//! The last input text and target are kept in a small JSON document so a
//! later `tally sum` or `tally watch` can pick up where the previous one left
//! off. Writers take an exclusive lock on a sibling `.lock` file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tally_core::TargetHours;

/// Saved input and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Interval lines exactly as entered, newline separated.
    pub input_text: String,

    /// Target saved alongside the input, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_hours: Option<TargetHours>,

    /// Whether watch mode should keep recalculating.
    #[serde(default = "default_auto_update")]
    pub auto_update: bool,

    /// When the session was last written.
    pub saved_at: DateTime<Utc>,
}

const fn default_auto_update() -> bool {
    true
}

impl Session {
    pub fn new(input_text: impl Into<String>, target_hours: Option<TargetHours>) -> Self {
        Self {
            input_text: input_text.into(),
            target_hours,
            auto_update: true,
            saved_at: Utc::now(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.input_text.lines()
    }
}

fn lock_path(path: &Path) -> PathBuf {
    path.with_extension("lock")
}

/// Loads the session from `path`.
///
/// Returns `None` if the file doesn't exist.
/// Returns an error if the file exists but is unreadable/unparseable.
pub fn load(path: &Path) -> Result<Option<Session>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let session: Session = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(Some(session))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// The saved `auto_update` flag, or `true` when there is no session.
pub fn auto_update(path: &Path) -> Result<bool> {
    Ok(load(path)?.is_none_or(|saved| saved.auto_update))
}

/// Writes the session to `path`, creating the parent directory if needed.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create session directory")?;
    }

    let lock_file = File::create(lock_path(path)).context("failed to create lock file")?;
    lock_file
        .lock_exclusive()
        .context("failed to acquire session lock")?;

    let json = serde_json::to_string_pretty(session).context("failed to serialize session")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), "saved session");
    Ok(())
}

/// Removes the session file.
///
/// Returns `false` if there was nothing to remove.
pub fn clear(path: &Path) -> Result<bool> {
    let removed = match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            return Err(e).with_context(|| format!("failed to remove {}", path.display()));
        }
    };

    // Stale lock files are harmless; ignore failures here.
    let _ = fs::remove_file(lock_path(path));
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let session = Session::new("5:00 - 8:05am\n9:45 -", Some("7.5".parse().unwrap()));
        save(&path, &session).unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.lines().collect::<Vec<_>>(), ["5:00 - 8:05am", "9:45 -"]);
    }

    #[test]
    fn test_save_overwrites_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&path, &Session::new("1 - 2", None)).unwrap();
        save(&path, &Session::new("3 - 4", None)).unwrap();

        assert_eq!(load(&path).unwrap().unwrap().input_text, "3 - 4");
    }

    #[test]
    fn test_load_accepts_minimal_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"{"input_text":"9 - 10","saved_at":"2025-01-29T12:00:00Z"}"#,
        )
        .unwrap();

        let session = load(&path).unwrap().unwrap();
        assert_eq!(session.target_hours, None);
        assert!(session.auto_update);
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&path, &Session::new("1 - 2", None)).unwrap();
        assert!(clear(&path).unwrap());
        assert!(load(&path).unwrap().is_none());
        assert!(!clear(&path).unwrap());
    }
}
