//! The session store interface.

use formwork_core::FormworkResult;

use crate::namespace::SessionNamespace;

/// A backend for storing and retrieving form session namespaces.
///
/// Implementations handle the persistence of namespaces (in memory, on disk,
/// in an external cache). Loading a missing or expired namespace yields a
/// fresh empty one rather than an error.
pub trait SessionStore: Send + Sync {
    /// Loads the namespace stored under `name`.
    fn load(&self, name: &str) -> FormworkResult<SessionNamespace>;

    /// Saves a namespace under its own name.
    fn save(&self, namespace: &SessionNamespace) -> FormworkResult<()>;

    /// Deletes the namespace stored under `name`.
    fn delete(&self, name: &str) -> FormworkResult<()>;

    /// Checks whether a live namespace exists under `name`.
    fn exists(&self, name: &str) -> FormworkResult<bool>;

    /// Removes all expired namespaces.
    fn clear_expired(&self) -> FormworkResult<()>;

    /// Loads, modifies and saves the namespace under `name`, returning the
    /// saved copy.
    ///
    /// The default implementation is not atomic. Stores shared between
    /// threads override it to hold their write lock for the whole cycle.
    fn update(
        &self,
        name: &str,
        f: &mut dyn FnMut(&mut SessionNamespace),
    ) -> FormworkResult<SessionNamespace> {
        let mut namespace = self.load(name)?;
        f(&mut namespace);
        self.save(&namespace)?;
        Ok(namespace)
    }
}
