//! Journey API server binary.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;
use journey_core::JourneyBuilder;
use journey_server::{args::Args, auth::TokenIssuer, serve, AppState};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        host,
        port,
        jwt_secret,
        token_ttl_days,
    } = Args::parse();

    if jwt_secret.trim().is_empty() {
        anyhow::bail!("JWT secret must not be empty");
    }

    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid host address '{host}'"))?;

    let journey = JourneyBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize database")?;

    info!("Journey started, database at {}", journey.database_path().display());

    let state = AppState::new(
        journey,
        TokenIssuer::from_days(jwt_secret.as_bytes(), token_ttl_days),
    );

    serve(SocketAddr::new(ip, port), state)
        .await
        .context("HTTP server failed")
}
