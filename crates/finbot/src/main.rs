mod config;

use intent::{GeminiClient, IntentExtractor};
use ledger::{Ledger, MemoryStore, SupabaseStore};
use liveness::LivenessServer;
use ::telegram::{scheduler, telegram, State};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Backend};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn build_ledger(backend: &Backend) -> Result<Ledger, BoxError> {
    match backend {
        Backend::Supabase { url, service_key } => {
            let store = SupabaseStore::new(url, service_key.clone())?;
            tracing::info!("Ledger backed by Supabase at {}", url);
            Ok(Ledger::with_store(store))
        }
        Backend::Memory { link_token } => {
            let store = MemoryStore::new();
            store.seed_global_categories();
            store.add_pending_integration("local-user", link_token);
            tracing::warn!(
                "Ledger kept in memory; data is lost on restart. Link with /start {}",
                link_token
            );
            Ok(Ledger::with_store(store))
        }
    }
}

fn build_extractor(config: &AppConfig) -> Result<IntentExtractor, BoxError> {
    let llm = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!("Gemini intent extraction enabled ({})", config.gemini_model);
            Some(GeminiClient::new(key.clone(), &config.gemini_model)?)
        }
        None => None,
    };
    Ok(IntentExtractor::new(llm)?)
}

async fn run() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;

    let ledger = build_ledger(&config.backend)?;
    let extractor = build_extractor(&config)?;
    let settings = config.bot.clone();

    let bot = Bot::new(&config.bot_token);
    if let Err(e) = telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    let server = LivenessServer::new("Finance bot online");
    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = server.serve("0.0.0.0", port).await {
            tracing::error!("Liveness server stopped: {}", e);
        }
    });

    scheduler::spawn(bot.clone(), ledger.clone(), settings.clone());

    tracing::info!("Bot started successfully");

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![
            InMemStorage::<State>::new(),
            ledger,
            extractor,
            settings
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}
