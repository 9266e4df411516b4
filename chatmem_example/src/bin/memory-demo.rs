use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chatmem::prelude::*;
use chatmem::{snapshots_from_json, snapshots_to_json};
use chatmem_example::config::{Backend, Config};
use chatmem_example::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    let session_id = std::env::args().nth(1).unwrap_or_else(|| "demo-session".to_string());
    tracing::info!(session_id = %session_id, backend = ?config.memory.backend, "Starting memory demo");

    let store = Arc::new(build_store(&config).await?);
    let session = store.session(session_id.as_str());

    let turns = vec![
        Message::user("What's a good name for a memory crate?"),
        Message::assistant("How about `chatmem`?"),
        Message::user("Can it keep only the last few turns?"),
        Message::assistant("Yes, reads are bounded to a recent window."),
    ];
    session.add_items(&turns).await?;

    let window = session.get_items(None).await?;
    println!("Recent window ({} messages):", window.len());
    for message in &window {
        println!("  [{}] {}", message.role, message.content);
    }

    let summary = session.summary().await?;
    println!(
        "Session {}: {} stored, {} in window (limit {}), more history: {}",
        summary.session_id,
        summary.total_items,
        summary.recent_items,
        summary.memory_limit,
        summary.has_more_history
    );

    let removed = session.cleanup_old_messages(config.memory.keep_count).await?;
    if removed > 0 {
        println!("Trimmed {} old messages", removed);
    }

    let archive = ConversationArchive::new().with_title_max_length(config.archive.title_max_length);
    let snapshots = read_snapshots(&config.archive.path).await;
    let (conversation_id, snapshots) = archive.save(None, &window, snapshots);
    tokio::fs::write(&config.archive.path, snapshots_to_json(&snapshots)?).await?;
    tracing::info!(path = %config.archive.path, ?conversation_id, "Archive saved");

    println!("Saved conversations:");
    for row in archive.list_for_display(&snapshots) {
        println!("  {}", row.text);
    }

    Ok(())
}

async fn build_store(config: &Config) -> Result<MemoryStore> {
    let builder = MemoryStore::builder().memory_limit(config.memory.limit);

    match config.memory.backend {
        Backend::Memory => Ok(builder.build().await?),
        #[cfg(feature = "mongodb")]
        Backend::Mongodb => {
            let uri = config.mongodb_uri.clone().unwrap_or_default();
            let store = builder
                .mongodb_uri(uri)
                .database(&config.mongodb.database)
                .collection(&config.mongodb.collection)
                .build()
                .await?;
            Ok(store)
        }
        #[cfg(not(feature = "mongodb"))]
        Backend::Mongodb => Err(anyhow::anyhow!(
            "mongodb backend requested but the `mongodb` feature is disabled"
        )),
    }
}

async fn read_snapshots(path: &str) -> Vec<Snapshot> {
    if !Path::new(path).exists() {
        return Vec::new();
    }
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => snapshots_from_json(&raw),
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to read saved conversations, starting empty");
            Vec::new()
        }
    }
}
