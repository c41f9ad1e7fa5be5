//! Web Finder - Entry Point
//!
//! A small web file manager serving a virtual folder tree over HTTP.

use log::{error, info};
use std::process;

use web_finder::Server;
use web_finder::config::ServerConfig;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    info!("Launching web finder...");

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server stopped: {}", e);
        process::exit(1);
    }
}
