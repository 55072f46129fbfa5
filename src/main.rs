use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncBufReadExt;

use zynthra_assist::collab::Platform;
use zynthra_assist::collab::mock::{MockCommerce, MockLocation, MockMessaging};
use zynthra_assist::config::SessionConfig;
use zynthra_assist::session::AssistantSession;
use zynthra_assist::store::LibSqlStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let db_path =
        std::env::var("ZYNTHRA_DB_PATH").unwrap_or_else(|_| "./data/zynthra.db".to_string());
    let user_id = std::env::var("ZYNTHRA_USER").unwrap_or_else(|_| "default".to_string());

    let mut config = SessionConfig::default();
    if let Ok(raw) = std::env::var("ZYNTHRA_PLATFORM") {
        match raw.parse::<Platform>() {
            Ok(platform) => config.preferred_platform = platform,
            Err(err) => tracing::warn!(error = %err, "ignoring ZYNTHRA_PLATFORM"),
        }
    }

    eprintln!("🤖 Zynthra Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", db_path);
    eprintln!("   User: {}", user_id);
    eprintln!("   Platform: {}", config.preferred_platform);
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let store = Arc::new(
        LibSqlStore::new_local(Path::new(&db_path))
            .await
            .context("failed to open session store")?,
    );

    let mut session = AssistantSession::new(
        user_id,
        config,
        store,
        Arc::new(MockCommerce::new()),
        Arc::new(MockMessaging::new()),
        Arc::new(MockLocation::new()),
    );

    if !session.initialize().await {
        anyhow::bail!("session initialization failed");
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }

        let reply = session.process_input(line, false).await;
        println!("{}", reply.response);
        if let Some(action) = &reply.action {
            println!("[action] {}", serde_json::to_string(action)?);
        }
    }

    Ok(())
}
