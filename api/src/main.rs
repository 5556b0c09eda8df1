use actix_web::HttpServer;
use anyhow::Context;
use tracing::info;

use gk_api::{app::create_app, startup, telemetry};
use gk_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; the per-environment file wins over `.env`
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        "Starting Gatekeep API Server"
    );

    let (services, pool) = startup::build(&config).await?;

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(services.state.clone(), services.verifier.clone())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!("Server stopped");
    Ok(())
}
