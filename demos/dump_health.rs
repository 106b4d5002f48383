// Dump recent system_health snapshots as JSON.
//
// Usage: cargo run --example dump_health -- [DB_PATH] [LIMIT]
//   DB_PATH  default: ./data/hostwatch.db
//   LIMIT    default: 5

use hostwatch::models::HealthSnapshot;
use hostwatch::store::{Collection, DocumentStore, SqliteStore};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("./data/hostwatch.db");
    let limit: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);

    let store = SqliteStore::connect(path, 1).await?;
    store.init().await?;
    let documents = store.find(Collection::SystemHealth, limit).await?;
    let snapshots = documents
        .into_iter()
        .map(serde_json::from_value::<HealthSnapshot>)
        .collect::<Result<Vec<_>, _>>()?;

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    store.close().await;
    Ok(())
}
