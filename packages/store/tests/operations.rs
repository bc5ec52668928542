//! End-to-end tests of the operation surface against real backends.

use nestdb_store::{Config, DocumentStore, Error};
use serde_json::json;

async fn open_mem() -> DocumentStore {
    DocumentStore::open(Config::new("mem://").warn_ready(false))
        .await
        .expect("in-memory store opens")
}

// ==================== key normalization ====================

#[tokio::test]
async fn separators_are_interchangeable() {
    let store = open_mem().await;

    store.set("a/b:c", json!(1)).await.unwrap();
    assert_eq!(store.get("a.b.c").await.unwrap(), Some(json!(1)));
    assert_eq!(store.get("a/b/c").await.unwrap(), Some(json!(1)));
    assert_eq!(store.get("a:b:c").await.unwrap(), Some(json!(1)));
    assert!(store.has("a:b/c").await.unwrap());
}

#[tokio::test]
async fn empty_key_is_invalid_argument() {
    let store = open_mem().await;
    assert!(matches!(
        store.get("").await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        store.set("", json!(1)).await,
        Err(Error::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn doubled_separator_is_invalid_argument() {
    let store = open_mem().await;
    assert!(matches!(
        store.set("a..b", json!(1)).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        store.get("a//b").await,
        Err(Error::InvalidArgument { .. })
    ));
}

// ==================== get / set / update ====================

#[tokio::test]
async fn set_get_round_trips_scalars() {
    let store = open_mem().await;

    store.set("s", json!("text")).await.unwrap();
    store.set("n", json!(42)).await.unwrap();
    store.set("f", json!(2.5)).await.unwrap();
    store.set("b", json!(true)).await.unwrap();
    store.set("z", json!(null)).await.unwrap();

    assert_eq!(store.get("s").await.unwrap(), Some(json!("text")));
    assert_eq!(store.get("n").await.unwrap(), Some(json!(42)));
    assert_eq!(store.get("f").await.unwrap(), Some(json!(2.5)));
    assert_eq!(store.get("b").await.unwrap(), Some(json!(true)));
    assert_eq!(store.get("z").await.unwrap(), Some(json!(null)));
}

#[tokio::test]
async fn get_missing_key_is_none() {
    let store = open_mem().await;
    assert_eq!(store.get("missing").await.unwrap(), None);
    assert_eq!(store.get("deeply.missing.path").await.unwrap(), None);
}

#[tokio::test]
async fn get_through_scalar_is_none() {
    let store = open_mem().await;
    store.set("leaf", json!(1)).await.unwrap();
    assert_eq!(store.get("leaf.below").await.unwrap(), None);
}

#[tokio::test]
async fn fetch_is_get() {
    let store = open_mem().await;
    store.set("k", json!("v")).await.unwrap();
    assert_eq!(store.fetch("k").await.unwrap(), Some(json!("v")));
}

#[tokio::test]
async fn root_key_returns_whole_map() {
    let store = open_mem().await;
    store.set("a.b", json!(1)).await.unwrap();
    assert_eq!(store.get(".").await.unwrap(), Some(json!({"a": {"b": 1}})));
}

#[tokio::test]
async fn set_preserves_sibling_branches() {
    let store = open_mem().await;

    store.set("a.x", json!(1)).await.unwrap();
    store.set("a.y", json!(2)).await.unwrap();
    store.set("other", json!("kept")).await.unwrap();

    assert_eq!(store.get("a.x").await.unwrap(), Some(json!(1)));
    assert_eq!(store.get("a.y").await.unwrap(), Some(json!(2)));
    assert_eq!(store.get("other").await.unwrap(), Some(json!("kept")));
}

#[tokio::test]
async fn update_preserves_sibling_branches() {
    let store = open_mem().await;

    store.update("a.x", json!(1)).await.unwrap();
    store.update("a.y", json!(2)).await.unwrap();

    assert_eq!(store.get("a.x").await.unwrap(), Some(json!(1)));
    assert_eq!(store.get("a.y").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn set_replaces_object_leaf_wholesale() {
    let store = open_mem().await;

    store.set("a", json!({"x": 1})).await.unwrap();
    store.set("a", json!({"y": 2})).await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), Some(json!({"y": 2})));
    assert_eq!(store.get("a.x").await.unwrap(), None);
}

#[tokio::test]
async fn update_merges_object_leaf() {
    let store = open_mem().await;

    store.update("a", json!({"x": 1})).await.unwrap();
    store.update("a", json!({"y": 2})).await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), Some(json!({"x": 1, "y": 2})));
}

#[tokio::test]
async fn set_root_replaces_document_data() {
    let store = open_mem().await;
    store.set("old", json!(1)).await.unwrap();

    store.set(".", json!({"fresh": true})).await.unwrap();
    assert_eq!(store.get(".").await.unwrap(), Some(json!({"fresh": true})));
}

#[tokio::test]
async fn set_root_requires_object() {
    let store = open_mem().await;
    assert!(matches!(
        store.set(".", json!(5)).await,
        Err(Error::TypeMismatch { .. })
    ));
}

#[tokio::test]
async fn update_root_merges_into_data() {
    let store = open_mem().await;
    store.set("a", json!(1)).await.unwrap();

    store.update(".", json!({"b": 2})).await.unwrap();
    assert_eq!(store.get(".").await.unwrap(), Some(json!({"a": 1, "b": 2})));
}

// ==================== has / delete ====================

#[tokio::test]
async fn has_root_on_fresh_document() {
    let store = open_mem().await;
    assert!(store.has(".").await.unwrap());
}

#[tokio::test]
async fn has_missing_path_is_false() {
    let store = open_mem().await;
    assert!(!store.has("missing.path").await.unwrap());
}

#[tokio::test]
async fn has_sees_nested_keys() {
    let store = open_mem().await;
    store.set("a.b.c", json!(1)).await.unwrap();
    assert!(store.has("a").await.unwrap());
    assert!(store.has("a.b").await.unwrap());
    assert!(store.has("a.b.c").await.unwrap());
    assert!(!store.has("a.b.d").await.unwrap());
}

#[tokio::test]
async fn delete_removes_key_and_keeps_siblings() {
    let store = open_mem().await;
    store.set("a.x", json!(1)).await.unwrap();
    store.set("a.y", json!(2)).await.unwrap();

    assert!(store.delete("a.x").await.unwrap());
    assert!(!store.has("a.x").await.unwrap());
    assert_eq!(store.get("a.y").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn delete_twice_returns_false() {
    let store = open_mem().await;
    store.set("gone", json!(1)).await.unwrap();

    assert!(store.delete("gone").await.unwrap());
    assert!(!store.delete("gone").await.unwrap());
}

#[tokio::test]
async fn delete_missing_key_returns_false() {
    let store = open_mem().await;
    assert!(!store.delete("never.there").await.unwrap());
}

#[tokio::test]
async fn delete_root_clears_data() {
    let store = open_mem().await;
    store.set("a", json!(1)).await.unwrap();

    assert!(store.delete(".").await.unwrap());
    assert_eq!(store.get(".").await.unwrap(), Some(json!({})));
    assert!(store.has(".").await.unwrap());
}

// ==================== push / pull ====================

#[tokio::test]
async fn push_creates_and_appends() {
    let store = open_mem().await;

    store.push("list", json!(1)).await.unwrap();
    store.push("list", json!(2)).await.unwrap();

    assert_eq!(store.get("list").await.unwrap(), Some(json!([1, 2])));
}

#[tokio::test]
async fn pull_removes_first_match() {
    let store = open_mem().await;
    store.set("list", json!([1, 2, 1])).await.unwrap();

    assert!(store.pull("list", &json!(1)).await.unwrap());
    assert_eq!(store.get("list").await.unwrap(), Some(json!([2, 1])));
}

#[tokio::test]
async fn pull_missing_element_returns_false() {
    let store = open_mem().await;
    store.set("list", json!([1, 2])).await.unwrap();

    assert!(!store.pull("list", &json!(99)).await.unwrap());
    assert_eq!(store.get("list").await.unwrap(), Some(json!([1, 2])));
}

#[tokio::test]
async fn push_on_non_array_is_type_mismatch() {
    let store = open_mem().await;
    store.set("scalar", json!("text")).await.unwrap();

    assert!(matches!(
        store.push("scalar", json!(1)).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(store.get("scalar").await.unwrap(), Some(json!("text")));
}

#[tokio::test]
async fn pull_on_non_array_is_type_mismatch() {
    let store = open_mem().await;
    store.set("scalar", json!(5)).await.unwrap();

    assert!(matches!(
        store.pull("scalar", &json!(5)).await,
        Err(Error::TypeMismatch { .. })
    ));
}

// ==================== add / sub ====================

#[tokio::test]
async fn add_on_absent_key_starts_from_zero() {
    let store = open_mem().await;
    assert_eq!(store.add("n", 5.0).await.unwrap(), 5.0);
    assert_eq!(store.get("n").await.unwrap(), Some(json!(5)));
}

#[tokio::test]
async fn add_then_sub() {
    let store = open_mem().await;
    store.add("n", 5.0).await.unwrap();
    assert_eq!(store.sub("n", 2.0).await.unwrap(), 3.0);
    assert_eq!(store.get("n").await.unwrap(), Some(json!(3)));
}

#[tokio::test]
async fn add_fractional_amounts() {
    let store = open_mem().await;
    store.add("n", 0.5).await.unwrap();
    assert_eq!(store.add("n", 0.25).await.unwrap(), 0.75);
    assert_eq!(store.get("n").await.unwrap(), Some(json!(0.75)));
}

#[tokio::test]
async fn add_zero_is_type_mismatch() {
    let store = open_mem().await;
    assert!(matches!(
        store.add("n", 0.0).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        store.sub("n", 0.0).await,
        Err(Error::TypeMismatch { .. })
    ));
}

#[tokio::test]
async fn add_non_finite_is_type_mismatch() {
    let store = open_mem().await;
    assert!(matches!(
        store.add("n", f64::NAN).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        store.add("n", f64::INFINITY).await,
        Err(Error::TypeMismatch { .. })
    ));
}

#[tokio::test]
async fn add_on_non_number_leaves_value_unchanged() {
    let store = open_mem().await;
    store.set("n", json!("not-a-number")).await.unwrap();

    assert!(matches!(
        store.add("n", 1.0).await,
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(store.get("n").await.unwrap(), Some(json!("not-a-number")));
}

// ==================== named documents ====================

#[tokio::test]
async fn named_documents_are_independent() {
    let store = open_mem().await;

    let players = store.doc("PLAYERS");
    players.ensure().await.unwrap();
    players.set("alice.score", json!(10)).await.unwrap();

    assert_eq!(store.get("alice.score").await.unwrap(), None);
    assert_eq!(
        players.get("alice.score").await.unwrap(),
        Some(json!(10))
    );
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let store = open_mem().await;
    let ghost = store.doc("GHOST");

    assert!(matches!(
        ghost.get("a").await,
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        ghost.set("a", json!(1)).await,
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(ghost.has("a").await, Err(Error::NotFound { .. })));
}

// ==================== connection / backend plumbing ====================

#[tokio::test]
async fn ping_reports_latency() {
    let store = open_mem().await;
    let latency = store.ping().await.unwrap();
    assert!(latency < std::time::Duration::from_secs(1));
}

#[tokio::test]
async fn file_backend_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", dir.path().display());

    {
        let store = DocumentStore::open(Config::new(url.as_str()).warn_ready(false))
            .await
            .unwrap();
        store.set("saved/key", json!("value")).await.unwrap();
    }

    let store = DocumentStore::open(Config::new(url.as_str()).warn_ready(false))
        .await
        .unwrap();
    assert_eq!(store.get("saved.key").await.unwrap(), Some(json!("value")));
}

#[tokio::test]
async fn file_backend_create_missing_option() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}/db", dir.path().display());

    let store = DocumentStore::open(
        Config::new(url)
            .warn_ready(false)
            .backend_option("create_missing", "true"),
    )
    .await
    .unwrap();

    store.set("k", json!(1)).await.unwrap();
    assert!(dir.path().join("db").join("DEFAULT.json").is_file());
}
