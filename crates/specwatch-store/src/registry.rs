//! Tracked-entry registry and change summary files

use crate::error::RegistryError;
use serde_json::Value;
use specwatch_domain::{TrackedEntry, UpdateResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads the registry at the start of a run and writes it back at the end
#[derive(Debug, Clone)]
pub struct RegistryManager {
    registry_path: PathBuf,
    summary_path: PathBuf,
}

impl RegistryManager {
    /// Create a manager for the given registry and summary files
    pub fn new(registry_path: impl Into<PathBuf>, summary_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            summary_path: summary_path.into(),
        }
    }

    /// Registry file path
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Summary file path
    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Read, parse and validate every entry.
    ///
    /// Any invalid entry fails the whole load.
    pub fn load(&self) -> Result<Vec<TrackedEntry>, RegistryError> {
        let contents = fs::read_to_string(&self.registry_path).map_err(|source| RegistryError::Io {
            path: self.registry_path.clone(),
            source,
        })?;
        let entries: Vec<TrackedEntry> =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
                path: self.registry_path.clone(),
                source,
            })?;

        for (index, entry) in entries.iter().enumerate() {
            entry.validate().map_err(|e| RegistryError::InvalidEntry {
                index,
                key: entry.key(),
                reason: e.to_string(),
            })?;
        }

        info!(
            "Loaded {} tracked entries from {}",
            entries.len(),
            self.registry_path.display()
        );
        Ok(entries)
    }

    /// Rewrite the registry with the given entries.
    ///
    /// Each entry is written as the document currently on disk with only the
    /// fields the run changed applied to it, so values the run never touched
    /// keep their exact spelling. Entries with no counterpart at the same
    /// index are written as serialized.
    pub fn save(&self, entries: &[TrackedEntry]) -> Result<(), RegistryError> {
        let baseline = self.read_baseline();
        let mut documents = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let current = serde_json::to_value(entry)?;
            let document = match baseline.get(index) {
                Some(base) if base.key == entry.key() => {
                    let mut document = base.raw.clone();
                    apply_changes(&mut document, &base.loaded, &current);
                    document
                }
                _ => current,
            };
            documents.push(document);
        }

        let mut json = serde_json::to_string_pretty(&documents)?;
        json.push('\n');
        write_file(&self.registry_path, json.as_bytes())
    }

    /// Raw documents on disk paired with their typed re-serialization
    fn read_baseline(&self) -> Vec<Baseline> {
        let Ok(contents) = fs::read_to_string(&self.registry_path) else {
            return Vec::new();
        };
        let Ok(documents) = serde_json::from_str::<Vec<Value>>(&contents) else {
            debug!("Existing registry is not an array, writing entries as serialized");
            return Vec::new();
        };

        documents
            .into_iter()
            .map_while(|raw| {
                let entry: TrackedEntry = serde_json::from_value(raw.clone()).ok()?;
                let loaded = serde_json::to_value(&entry).ok()?;
                Some(Baseline {
                    key: entry.key(),
                    raw,
                    loaded,
                })
            })
            .collect()
    }

    /// Write the change summary, one line per update.
    ///
    /// Nothing is written when `updates` is empty; returns whether the file was written.
    pub fn write_summary(&self, updates: &[UpdateResult]) -> Result<bool, RegistryError> {
        if updates.is_empty() {
            return Ok(false);
        }
        let summary = render_summary(updates);
        write_file(&self.summary_path, summary.as_bytes())?;
        Ok(true)
    }
}

struct Baseline {
    key: String,
    raw: Value,
    loaded: Value,
}

/// Apply the difference between `before` and `after` to `document`.
///
/// Objects are merged key by key; anything else that differs is replaced.
fn apply_changes(document: &mut Value, before: &Value, after: &Value) {
    if before == after {
        return;
    }
    match (document, before, after) {
        (Value::Object(doc), Value::Object(before), Value::Object(after)) => {
            for key in before.keys() {
                if !after.contains_key(key) {
                    doc.remove(key);
                }
            }
            for (key, new) in after {
                match before.get(key) {
                    Some(old) if doc.contains_key(key) => {
                        if let Some(slot) = doc.get_mut(key) {
                            apply_changes(slot, old, new);
                        }
                    }
                    _ => {
                        doc.insert(key.clone(), new.clone());
                    }
                }
            }
        }
        (document, _, after) => *document = after.clone(),
    }
}

/// Newline-joined summary lines
pub fn render_summary(updates: &[UpdateResult]) -> String {
    updates
        .iter()
        .map(UpdateResult::summary_line)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Create parent directories, then write through a scoped handle
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RegistryError> {
    let io_err = |source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
