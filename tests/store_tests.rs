// SqliteStore tests: connect, init, insert, count, distinct, find

mod common;

use common::{blocked_request, request_log, seed_logs, sqlite_store};
use hostwatch::store::{Collection, DocumentStore, SqliteStore, StoreError};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn store_connect_and_init() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("hostwatch.db");

    let store = SqliteStore::connect(path.to_str().unwrap(), 1)
        .await
        .unwrap();
    store.init().await.unwrap();
    // Second init is no-op (IF NOT EXISTS)
    store.init().await.unwrap();

    for collection in Collection::ALL {
        assert_eq!(store.count(collection).await.unwrap(), 0);
    }
    store.close().await;
}

#[tokio::test]
async fn store_count_tracks_inserts() {
    let (_dir, store) = sqlite_store().await;
    assert_eq!(store.count(Collection::Logs).await.unwrap(), 0);

    store
        .insert(Collection::Logs, &request_log("10.0.0.1", "/"))
        .await
        .unwrap();
    assert_eq!(store.count(Collection::Logs).await.unwrap(), 1);

    seed_logs(&store, 1000).await;
    assert_eq!(store.count(Collection::Logs).await.unwrap(), 1001);
    // Collections are independent.
    assert_eq!(store.count(Collection::BlockedRequests).await.unwrap(), 0);
}

#[tokio::test]
async fn store_find_respects_limit_and_insertion_order() {
    let (_dir, store) = sqlite_store().await;
    for path in ["/a", "/b", "/c"] {
        store
            .insert(Collection::Logs, &request_log("10.0.0.1", path))
            .await
            .unwrap();
    }

    let two = store.find(Collection::Logs, 2).await.unwrap();
    assert_eq!(two.len(), 2);
    assert_eq!(two[0]["urlPath"], "/a");
    assert_eq!(two[1]["urlPath"], "/b");

    let all = store.find(Collection::Logs, 1000).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2], request_log("10.0.0.1", "/c"));
}

#[tokio::test]
async fn store_find_on_empty_collection_is_empty() {
    let (_dir, store) = sqlite_store().await;
    assert!(store.find(Collection::Logs, 1000).await.unwrap().is_empty());
}

#[tokio::test]
async fn store_distinct_returns_each_value_once() {
    let (_dir, store) = sqlite_store().await;
    let docs = vec![
        blocked_request("10.0.0.5"),
        blocked_request("10.0.0.6"),
        blocked_request("10.0.0.5"),
    ];
    store
        .insert_many(Collection::BlockedRequests, &docs)
        .await
        .unwrap();

    let mut ips = store
        .distinct(Collection::BlockedRequests, "ipAddress")
        .await
        .unwrap();
    ips.sort_by_key(|v| v.to_string());
    assert_eq!(ips, vec![json!("10.0.0.5"), json!("10.0.0.6")]);
}

#[tokio::test]
async fn store_distinct_skips_missing_and_null_fields() {
    let (_dir, store) = sqlite_store().await;
    let docs = vec![
        json!({ "ipAddress": "10.0.0.5" }),
        json!({ "reason": "no ip" }),
        json!({ "ipAddress": null }),
    ];
    store
        .insert_many(Collection::BlockedRequests, &docs)
        .await
        .unwrap();

    let ips = store
        .distinct(Collection::BlockedRequests, "ipAddress")
        .await
        .unwrap();
    assert_eq!(ips, vec![json!("10.0.0.5")]);
}

#[tokio::test]
async fn store_distinct_rejects_field_paths() {
    let (_dir, store) = sqlite_store().await;
    let err = store
        .distinct(Collection::BlockedRequests, "a.b")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidField(_)));
}

#[tokio::test]
async fn store_rejects_non_object_documents() {
    let (_dir, store) = sqlite_store().await;
    let err = store
        .insert(Collection::Logs, &json!(["not", "a", "document"]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotAnObject {
            collection: Collection::Logs
        }
    ));
    assert_eq!(store.count(Collection::Logs).await.unwrap(), 0);
}

#[tokio::test]
async fn store_insert_many_is_all_or_nothing() {
    let (_dir, store) = sqlite_store().await;
    let docs = vec![request_log("10.0.0.1", "/"), json!(42)];
    assert!(store.insert_many(Collection::Logs, &docs).await.is_err());
    assert_eq!(store.count(Collection::Logs).await.unwrap(), 0);
}

#[tokio::test]
async fn store_reads_fail_after_close() {
    let (_dir, store) = sqlite_store().await;
    store.close().await;
    let err = store.count(Collection::Logs).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));
}
