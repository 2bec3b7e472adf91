//! Rideshare entry-point: loads settings, wires the ride store and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rideshare::example_data::load_ride_seeds;
use rideshare::inbound::http::health::HealthState;
use rideshare::outbound::persistence::{DbPool, PoolConfig};
use rideshare::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut config =
        ServerConfig::new(bind_addr).with_retry_policy(settings.join_retry_policy());

    if let Some(database_url) = settings.database_url() {
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
        if settings.seed_path().is_some() {
            warn!("seed path ignored because a database is configured");
        }
    } else if let Some(seed_path) = settings.seed_path() {
        let rides = load_ride_seeds(seed_path).map_err(std::io::Error::other)?;
        config = config.with_seed_rides(rides);
    } else {
        info!("no database or seed file configured; starting with an empty ride store");
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting rideshare server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
