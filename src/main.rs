use anyhow::{Context, Result};
use faq_service::{api, build_service, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("faq_service=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting FAQ service");

    // Load configuration from environment
    let config = Config::from_env()?;
    let service = build_service(&config).await?;

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on {}", addr);
    api::serve(service, &addr)
        .await
        .context("HTTP server failed")?;

    info!("Shut down cleanly");
    Ok(())
}
