//! Integration tests for the JSON file backed state store.

use std::path::PathBuf;

use local_state::{FileStateStore, StateSlot, StateStore};

fn temp_state_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("pizzaria-state-{}", uuid::Uuid::new_v4()))
        .join("state.json")
}

async fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}

#[tokio::test]
async fn test_missing_file_is_empty_store() {
    let path = temp_state_path();
    let store = FileStateStore::new(&path);

    assert_eq!(store.get("cart").await.unwrap(), None);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_values_survive_a_new_handle() {
    let path = temp_state_path();

    let store = FileStateStore::new(&path);
    store.set("orderId", "7".to_string()).await.unwrap();
    store.set("cart", "[]".to_string()).await.unwrap();
    drop(store);

    let reopened = FileStateStore::new(&path);
    assert_eq!(reopened.get("orderId").await.unwrap().as_deref(), Some("7"));
    assert_eq!(reopened.get("cart").await.unwrap().as_deref(), Some("[]"));

    cleanup(&path).await;
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let path = temp_state_path();
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(&path, "{ this is not json").await.unwrap();

    let store = FileStateStore::new(&path);
    assert_eq!(store.get("orderId").await.unwrap(), None);

    store.set("orderId", "3".to_string()).await.unwrap();
    assert_eq!(store.get("orderId").await.unwrap().as_deref(), Some("3"));

    cleanup(&path).await;
}

#[tokio::test]
async fn test_remove_deletes_only_the_given_key() {
    let path = temp_state_path();
    let store = FileStateStore::new(&path);
    store.set("cart", "[]".to_string()).await.unwrap();
    store.set("orderId", "9".to_string()).await.unwrap();

    store.remove("cart").await.unwrap();
    store.remove("missing").await.unwrap();

    assert_eq!(store.get("cart").await.unwrap(), None);
    assert_eq!(store.get("orderId").await.unwrap().as_deref(), Some("9"));

    cleanup(&path).await;
}

#[tokio::test]
async fn test_typed_slot_over_file_store() {
    const IDS: StateSlot<Vec<i64>> = StateSlot::new("ids");

    let path = temp_state_path();
    let store = FileStateStore::new(&path);

    IDS.save(&store, &vec![1, 2, 3]).await.unwrap();
    assert_eq!(IDS.load(&store).await.unwrap(), Some(vec![1, 2, 3]));

    store.set("ids", "{\"oops\":true}".to_string()).await.unwrap();
    assert_eq!(IDS.load(&store).await.unwrap(), None);

    cleanup(&path).await;
}
