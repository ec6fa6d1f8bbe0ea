//! An in-memory session store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use formwork_core::{FormworkError, FormworkResult};

use crate::namespace::SessionNamespace;
use crate::store::SessionStore;

/// Stores all namespaces in a thread-safe in-memory map.
///
/// Namespaces are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    namespaces: RwLock<HashMap<String, SessionNamespace>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored namespaces, expired ones included.
    pub fn len(&self) -> usize {
        self.read().map_or(0, |map| map.len())
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> FormworkResult<RwLockReadGuard<'_, HashMap<String, SessionNamespace>>> {
        self.namespaces
            .read()
            .map_err(|_| FormworkError::SessionError("session store lock poisoned".into()))
    }

    fn write(&self) -> FormworkResult<RwLockWriteGuard<'_, HashMap<String, SessionNamespace>>> {
        self.namespaces
            .write()
            .map_err(|_| FormworkError::SessionError("session store lock poisoned".into()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, name: &str) -> FormworkResult<SessionNamespace> {
        let namespaces = self.read()?;
        Ok(namespaces
            .get(name)
            .filter(|ns| !ns.is_expired())
            .cloned()
            .map_or_else(
                || SessionNamespace::new(name),
                |mut ns| {
                    ns.modified = false;
                    ns
                },
            ))
    }

    fn save(&self, namespace: &SessionNamespace) -> FormworkResult<()> {
        let mut stored = namespace.clone();
        stored.modified = false;
        self.write()?.insert(stored.name.clone(), stored);
        tracing::debug!(namespace = %namespace.name, "session namespace saved");
        Ok(())
    }

    fn delete(&self, name: &str) -> FormworkResult<()> {
        self.write()?.remove(name);
        Ok(())
    }

    fn exists(&self, name: &str) -> FormworkResult<bool> {
        Ok(self.read()?.get(name).is_some_and(|ns| !ns.is_expired()))
    }

    fn clear_expired(&self) -> FormworkResult<()> {
        self.write()?.retain(|_, ns| !ns.is_expired());
        Ok(())
    }

    fn update(
        &self,
        name: &str,
        f: &mut dyn FnMut(&mut SessionNamespace),
    ) -> FormworkResult<SessionNamespace> {
        let mut namespaces = self.write()?;
        let mut namespace = namespaces
            .get(name)
            .filter(|ns| !ns.is_expired())
            .cloned()
            .unwrap_or_else(|| SessionNamespace::new(name));
        f(&mut namespace);
        namespace.modified = false;
        namespaces.insert(name.to_string(), namespace.clone());
        drop(namespaces);
        Ok(namespace)
    }
}
