/// Bounded history persistence
///
/// The last few generations are stored as a single JSON file in the
/// user's data directory:
/// - Linux: ~/.local/share/ai-image-studio/history.json
/// - macOS: ~/Library/Application Support/ai-image-studio/history.json
/// - Windows: %APPDATA%\ai-image-studio\history.json
///
/// Persistence is best-effort: a missing, unreadable, or malformed
/// file loads as an empty history, and write failures are logged and
/// absorbed. The UI must stay usable regardless of what happens here.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::state::data::GeneratedImage;

/// Maximum number of persisted generations
pub const MAX_HISTORY: usize = 5;

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store at the default platform location
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Create a store backed by an explicit file (used by tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Where the history file lives
    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("ai-image-studio");
        path.push("history.json");
        path
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the persisted history, newest first.
    /// Missing or corrupt content yields an empty list.
    pub fn load(&self) -> Vec<GeneratedImage> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("no history file at {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<GeneratedImage>>(&contents) {
            Ok(mut history) => {
                // Defend against a file written by hand or by an older build
                history.truncate(MAX_HISTORY);
                history
            }
            Err(e) => {
                warn!("discarding malformed history file: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the history, truncated to `MAX_HISTORY` entries.
    /// Failures are logged, never surfaced.
    pub fn save(&self, history: &[GeneratedImage]) {
        if let Err(e) = self.try_save(history) {
            warn!("failed to persist history: {}", e);
        }
    }

    fn try_save(&self, history: &[GeneratedImage]) -> Result<(), GenerateError> {
        let bounded = &history[..history.len().min(MAX_HISTORY)];

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GenerateError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string(bounded)
            .map_err(|e| GenerateError::Storage(format!("serialize history: {}", e)))?;

        fs::write(&self.path, json)
            .map_err(|e| GenerateError::Storage(format!("write {}: {}", self.path.display(), e)))
    }

    /// Remove the persisted history entirely. A missing file is fine.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to clear history file: {}", e),
        }
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Draft, GenerationRequest, Style};
    use tempfile::tempdir;

    fn image(prompt: &str) -> GeneratedImage {
        let request = GenerationRequest::from_draft(&Draft {
            prompt: prompt.to_string(),
            style: Style::Realistic,
            ..Draft::default()
        });
        GeneratedImage::new(&request, "data:image/png;base64,AAAA".to_string())
    }

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::with_path(dir.path().join("history.json"))
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let history = vec![image("two"), image("one")];
        store.save(&history);

        assert_eq!(store.load(), history);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_truncates_to_five() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let history: Vec<_> = (0..8).map(|i| image(&format!("prompt {}", i))).collect();
        store.save(&history);

        let loaded = store.load();
        assert_eq!(loaded.len(), MAX_HISTORY);
        assert_eq!(loaded[0].prompt, "prompt 0");
        assert_eq!(loaded[4].prompt, "prompt 4");
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&[image("one")]);
        store.clear();
        assert!(store.load().is_empty());

        // Clearing an already-missing file is fine
        store.clear();
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::with_path(dir.path().join("nested").join("history.json"));

        store.save(&[image("one")]);
        assert_eq!(store.load().len(), 1);
    }
}
