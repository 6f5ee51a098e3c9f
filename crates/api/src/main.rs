use std::sync::Arc;

use citysim_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    citysim_observability::init(config.log_format);

    let services = Arc::new(app::services::AppServices::from_settings(&config.ai)?);
    tracing::info!(
        provider = services.provider_name(),
        timeout_ms = config.ai.timeout.as_millis() as u64,
        "AI provider configured"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app::build_app(services)).await?;
    Ok(())
}
