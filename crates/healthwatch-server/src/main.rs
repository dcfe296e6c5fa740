mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use healthwatch_insight::InsightClient;
use healthwatch_locator::{OverpassClient, ResolverConfig};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(healthwatch_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = healthwatch_db::PoolConfig::from_app_config(&config);
    let pool = healthwatch_db::connect_pool(&config.database_url, pool_config).await?;
    healthwatch_db::run_migrations(&pool).await?;
    if healthwatch_db::seed_demo_data(&pool).await? {
        tracing::info!("seeded demo dataset");
    }

    let insight = match &config.hf_api_key {
        Some(api_key) => Some(Arc::new(InsightClient::with_base_url(
            api_key,
            &config.insight_model,
            config.insight_timeout_secs,
            &config.insight_base_url,
        )?)),
        None => {
            tracing::warn!("HF_API_KEY not set; insights will use rule-based fallback text");
            None
        }
    };

    let overpass = Arc::new(OverpassClient::with_base_url(
        config.locator_timeout_secs,
        &config.http_user_agent,
        &config.overpass_base_url,
    )?);

    let state = AppState {
        pool,
        insight,
        overpass,
        lookup_defaults: ResolverConfig {
            radius_km: config.locator_radius_km,
            category: config.locator_category.clone(),
        },
    };

    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting healthwatch server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
