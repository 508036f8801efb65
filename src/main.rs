use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use askvoice_server::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration from environment
    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    tracing::info!("AskVoice Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Audio file: {}", config.audio_path().display());
    tracing::info!(
        "Model: {} ({:?} answers)",
        config.gemini_model,
        config.answer_mode
    );
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api requests will fail");
    }

    // Create app state
    let state = Arc::new(AppState::from_config(&config)?);

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
