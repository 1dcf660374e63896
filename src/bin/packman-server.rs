// ABOUTME: Server binary for the Packman pack fulfilment API
// ABOUTME: Loads configuration, connects and migrates the database, and serves HTTP until signalled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Packman Server Binary
//!
//! Starts the HTTP API with the database backend selected by `DATABASE_URL`.

use anyhow::Result;
use clap::Parser;
use packman::{
    config::{environment::ServerConfig, DatabaseUrl},
    database_plugins::{factory::Database, DatabaseProvider},
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "packman-server")]
#[command(about = "Packman - pack-size fulfilment API with versioned pack configuration")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Starting Packman server");

    let database = Database::connect(&config.database).await?;
    info!(
        "Database initialized successfully: {}",
        database.backend_info()
    );

    if config.database.auto_migrate {
        database.migrate().await?;
        info!("Database schema is up to date");
    }

    let resources = ServerResources::new(database, Arc::new(config));
    server::serve(resources).await?;

    info!("Packman server stopped");
    Ok(())
}
