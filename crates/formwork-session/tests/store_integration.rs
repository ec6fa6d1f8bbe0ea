//! Integration tests for the session stores.
//!
//! Both stores are exercised through the `SessionStore` trait object the
//! forms crate uses.

use std::sync::Arc;
use std::thread;

use formwork_session::{
    CsrfToken, FileSessionStore, InMemorySessionStore, SessionNamespace, SessionStore,
};

fn roundtrip(store: &dyn SessionStore) {
    let mut ns = SessionNamespace::new("formwork.form.signup");
    ns.values
        .insert("name".into(), serde_json::json!({"type": "String", "value": "Ann"}));
    ns.errors
        .push(serde_json::json!({"message": "Field `E-mail` is required.", "fields": ["email"]}));
    ns.push_csrf(CsrfToken {
        name: "tok".into(),
        value: "abc".into(),
    });
    ns.set_expiration_seconds(600);
    store.save(&ns).unwrap();

    let loaded = store.load("formwork.form.signup").unwrap();
    assert_eq!(loaded.values, ns.values);
    assert_eq!(loaded.errors, ns.errors);
    assert!(loaded.has_csrf("tok", "abc"));
    assert_eq!(loaded.expiration_seconds(), 600);

    store
        .update("formwork.form.signup", &mut |ns: &mut SessionNamespace| ns.clear())
        .unwrap();
    assert!(store.load("formwork.form.signup").unwrap().is_empty());
}

#[test]
fn test_memory_store_roundtrip() {
    roundtrip(&InMemorySessionStore::new());
}

#[test]
fn test_file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(&FileSessionStore::new(dir.path()));
}

#[test]
fn test_memory_store_concurrent_updates_are_serialized() {
    let store = Arc::new(InMemorySessionStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .update("shared", &mut |ns| {
                        ns.errors.push(serde_json::json!(i));
                    })
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.load("shared").unwrap().errors.len(), 8);
}
