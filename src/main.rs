use anyhow::Result;
use coris_site::{config::Config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the host)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coris_site=info".parse()?),
        )
        .init();

    info!("Starting Coris Digital site");

    let config = Config::from_env()?;

    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set, the planner will answer with its error message");
    }

    server::serve(&config).await
}
