// Insert sample request logs and blocked requests, as the gateway would.
//
// Usage: cargo run --example seed_logs -- [DB_PATH]
//   DB_PATH  default: ./data/hostwatch.db

use hostwatch::models::BlockedRequestRecord;
use hostwatch::store::{Collection, DocumentStore, SqliteStore};
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/hostwatch.db".into());

    let store = SqliteStore::connect(&path, 1).await?;
    store.init().await?;

    let now = chrono::Utc::now().to_rfc3339();
    let logs = vec![
        json!({
            "timestamp": now,
            "ipAddress": "192.168.1.1",
            "userAgent": "Mozilla/5.0",
            "geoLocation": "New York, USA",
            "httpHeaders": r#"{"User-Agent": "Mozilla/5.0"}"#,
            "urlPath": "/home",
            "queryParameters": r#"{"search": "rust"}"#,
            "connectionDuration": "123ms",
            "referrer": "https://google.com",
            "cookies": r#"{"session_id": "abc123"}"#,
            "protocolType": "HTTP/1.1",
            "portNumber": "8080",
            "trafficVolume": 1024,
            "sessionId": "abc123",
            "requestMethod": "GET",
            "responseTime": 123,
            "statusCode": 200,
            "requestPayloadSize": 0,
        }),
        json!({
            "timestamp": now,
            "ipAddress": "192.168.1.2",
            "userAgent": "Mozilla/5.0",
            "geoLocation": "London, UK",
            "httpHeaders": r#"{"User-Agent": "Mozilla/5.0"}"#,
            "urlPath": "/login",
            "queryParameters": r#"{"username": "test"}"#,
            "connectionDuration": "150ms",
            "referrer": "https://bing.com",
            "cookies": r#"{"session_id": "xyz456"}"#,
            "protocolType": "HTTP/2",
            "portNumber": "443",
            "trafficVolume": 2048,
            "sessionId": "xyz456",
            "requestMethod": "POST",
            "responseTime": 150,
            "statusCode": 201,
            "requestPayloadSize": 100,
        }),
    ];
    store.insert_many(Collection::Logs, &logs).await?;

    let blocked = BlockedRequestRecord {
        blocked_at: Some(chrono::Utc::now()),
        reason: Some("IP blacklisted".into()),
        request_url: Some("/admin".into()),
        user_agent: Some("curl/8.0".into()),
        ..BlockedRequestRecord::new("10.0.0.5")
    };
    store
        .insert(Collection::BlockedRequests, &serde_json::to_value(&blocked)?)
        .await?;

    println!("Inserted {} test logs and 1 blocked request.", logs.len());
    store.close().await;
    Ok(())
}
