use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use word_chain_game::config::Config;
use word_chain_game::handlers::Handle;
use word_chain_game::models::{ChainGenerator, Game, WordGraph};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let graph = WordGraph::load(&config.word_pairs_path)
        .with_context(|| format!("loading word pairs from {}", config.word_pairs_path))?;
    info!(words = graph.len(), "Loaded word graph");

    let game = Game::new(ChainGenerator::new(Arc::new(graph)));
    let app = Handle::router(game, &config.static_files_path);

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Listening on {}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
