use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use traffic_predictor::{config::AppConfig, web, AppContext, TorchModel};

// One request at a time: the handler runs inference with no await point.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        "model_path={} meta_path={:?} bind_addr={}",
        cfg.model_path.display(),
        cfg.meta_path,
        cfg.bind_addr
    );

    // A failed load is not fatal here: the page still comes up and shows why.
    let ctx = AppContext::from_load(TorchModel::load(&cfg.model_path, cfg.meta_path.as_deref()));

    let app = web::router(Arc::new(ctx));

    tracing::info!("listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
