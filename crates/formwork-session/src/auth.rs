//! The authentication collaborator consulted for session expiration.

/// Exposes the signed-in user, if any, to the session layer.
pub trait Authentication: Send + Sync {
    /// Returns `true` if a user is signed in for the current request.
    fn has_user(&self) -> bool;

    /// Returns the lifetime of the user's authorization in seconds.
    fn authorization_expiration(&self) -> u64;
}

/// Resolves the lifetime of a form's session record.
///
/// An explicitly configured expiration wins. Otherwise a signed-in user's
/// authorization expiration is inherited, and `0` (until the browser session
/// ends) is the fallback.
pub fn resolve_expiration(configured: Option<u64>, auth: Option<&dyn Authentication>) -> u64 {
    if let Some(seconds) = configured {
        return seconds;
    }
    auth.filter(|auth| auth.has_user())
        .map_or(0, |auth| auth.authorization_expiration())
}
