mod analysis;
mod config;
mod conversation;
mod errors;
mod ingest;
mod llm_client;
mod session;
mod state;
mod telegram;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::job_source::WebJobSource;
use crate::ingest::pdf::PdfTextExtractor;
use crate::ingest::upload::UploadDir;
use crate::llm_client::LlmClient;
use crate::session::InMemorySessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing

    // Logging first, so a configuration failure is logged before exit
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS resume bot v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().inspect_err(|e| error!("Refusing to start: {e:#}"))?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir {}", config.upload_dir.display()))?;
    info!(
        "Uploads in {} (retained: {})",
        config.upload_dir.display(),
        config.retain_uploads
    );

    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let jobs = WebJobSource::new(Duration::from_secs(config.fetch_timeout_secs))?;

    let state = AppState {
        sessions: Arc::new(InMemorySessionStore::new()),
        extractor: Arc::new(PdfTextExtractor),
        jobs: Arc::new(jobs),
        llm: Arc::new(llm),
        uploads: UploadDir::new(config.upload_dir.clone(), config.retain_uploads),
    };

    let bot = Bot::new(config.telegram_bot_token.clone());
    info!("Starting dispatcher with long polling");
    telegram::run(bot, state).await;

    info!("Dispatcher stopped");
    Ok(())
}
