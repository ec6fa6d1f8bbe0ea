//! A file-based session store that keeps each namespace as a JSON file.
//!
//! Namespaces are stored as `{storage_path}/{name}.json`, with characters
//! outside `[A-Za-z0-9._-]` in the name replaced by `_`. Suitable for
//! development and single-server deployments.

use std::path::{Path, PathBuf};

use formwork_core::{FormworkError, FormworkResult};

use crate::namespace::SessionNamespace;
use crate::store::SessionStore;

/// Stores each namespace in its own JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    storage_path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store rooted at `storage_path`.
    ///
    /// The directory is created on the first save.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// Returns the directory namespaces are stored in.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn namespace_file(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.storage_path.join(format!("{safe}.json"))
    }

    fn ensure_dir(&self) -> FormworkResult<()> {
        std::fs::create_dir_all(&self.storage_path).map_err(|e| {
            FormworkError::SessionError(format!(
                "Failed to create session directory '{}': {e}",
                self.storage_path.display()
            ))
        })
    }

    fn read_file(path: &Path) -> FormworkResult<Option<SessionNamespace>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FormworkError::SessionError(format!(
                    "Failed to read session file '{}': {e}",
                    path.display()
                )))
            }
        };
        let namespace: SessionNamespace = serde_json::from_str(&content).map_err(|e| {
            FormworkError::SessionError(format!(
                "Invalid session file '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Some(namespace))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, name: &str) -> FormworkResult<SessionNamespace> {
        let path = self.namespace_file(name);
        match Self::read_file(&path)? {
            Some(ns) if ns.is_expired() => {
                let _ = std::fs::remove_file(&path);
                tracing::debug!(namespace = %name, "expired session namespace removed");
                Ok(SessionNamespace::new(name))
            }
            Some(ns) => Ok(ns),
            None => Ok(SessionNamespace::new(name)),
        }
    }

    fn save(&self, namespace: &SessionNamespace) -> FormworkResult<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(namespace).map_err(|e| {
            FormworkError::SessionError(format!("Failed to serialize session namespace: {e}"))
        })?;

        let path = self.namespace_file(&namespace.name);
        std::fs::write(&path, content.as_bytes()).map_err(|e| {
            FormworkError::SessionError(format!(
                "Failed to write session file '{}': {e}",
                path.display()
            ))
        })?;
        tracing::debug!(namespace = %namespace.name, path = %path.display(), "session namespace saved");
        Ok(())
    }

    fn delete(&self, name: &str) -> FormworkResult<()> {
        match std::fs::remove_file(self.namespace_file(name)) {
            Ok(()) | Err(_) => Ok(()),
        }
    }

    fn exists(&self, name: &str) -> FormworkResult<bool> {
        Ok(Self::read_file(&self.namespace_file(name))?.is_some_and(|ns| !ns.is_expired()))
    }

    fn clear_expired(&self) -> FormworkResult<()> {
        self.ensure_dir()?;

        let entries = std::fs::read_dir(&self.storage_path).map_err(|e| {
            FormworkError::SessionError(format!(
                "Failed to read session directory '{}': {e}",
                self.storage_path.display()
            ))
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(std::ffi::OsStr::to_str) != Some("json") {
                continue;
            }
            if let Ok(Some(ns)) = Self::read_file(&path) {
                if ns.is_expired() {
                    let _ = std::fs::remove_file(&path);
                }
            }
        }

        Ok(())
    }
}
