use anyhow::{Context, Result};
use pizza_api::{build_app, ApiConfig};
use pizza_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("pizza_api");

    let config = ApiConfig::from_env();
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        seeded = config.rng_seed.is_some(),
        "pizza responder api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
