//! Anti-forgery tokens.
//!
//! A form issues a token pair (a random parameter name and a random secret)
//! when it is rendered and stores it in its session namespace. A submission
//! passes the check when it posts the secret under one of the stored names.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use formwork_session::{CsrfToken, SessionNamespace};
use rand::RngCore;

use crate::params::RequestParams;

/// Secret length in bytes before encoding.
const CSRF_SECRET_LENGTH: usize = 32;

/// Generates a fresh token pair.
///
/// The name is a simple-format UUID prefixed with a letter so it is always
/// a valid HTML name; the value is 32 random bytes in URL-safe base64.
pub fn generate_token() -> CsrfToken {
    let mut bytes = [0u8; CSRF_SECRET_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);
    CsrfToken {
        name: format!("c{}", uuid::Uuid::new_v4().simple()),
        value: URL_SAFE_NO_PAD.encode(bytes),
    }
}

/// Returns `true` if `params` carry one of the tokens stored in `namespace`.
pub fn matches_posted(namespace: &SessionNamespace, params: &RequestParams) -> bool {
    namespace.csrf.iter().any(|token| {
        params
            .get(&token.name)
            .and_then(|raw| raw.first())
            .is_some_and(|posted| constant_time_eq(posted.as_bytes(), token.value.as_bytes()))
    })
}

/// Compares two byte slices without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.name.len(), 33);
        assert!(token.name.starts_with('c'));
        // 32 bytes = 43 base64 chars without padding
        assert_eq!(token.value.len(), 43);
        assert!(!token.value.contains('+'));
        assert!(!token.value.contains('/'));
    }

    #[test]
    fn test_generate_token_uniqueness() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a.name, b.name);
        assert_ne!(a.value, b.value);
    }

    #[test]
    fn test_matches_posted() {
        let mut ns = SessionNamespace::new("formwork.form.f");
        let token = generate_token();
        ns.push_csrf(token.clone());

        let ok = RequestParams::from_pairs(vec![(token.name.as_str(), token.value.as_str())]);
        assert!(matches_posted(&ns, &ok));

        let wrong = RequestParams::from_pairs(vec![(token.name.as_str(), "nope")]);
        assert!(!matches_posted(&ns, &wrong));
        assert!(!matches_posted(&ns, &RequestParams::new()));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
