//! # Record Shop Backend
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_core::Config;
use lib_web::{init_tracing, start_server, ServerConfig};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::load().inspect_err(|e| error!("Configuration error: {}", e))?;
    let server = ServerConfig::from_env();

    start_server(config, server).await
}
