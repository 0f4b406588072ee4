//! Serves the very-simple chaincode on the configured address.
//!
//! ```text
//! CHAINCODE_ADDRESS=127.0.0.1:7052 cargo run --example very_simple -- chaincode.toml
//! ```

use chaincode_dispatch::{
    chaincode::very_simple, config::load_config, logging::init_tracing, net::server::Server,
    TracingLogger,
};
use std::{error::Error, sync::Arc};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref())?;
    init_tracing(&config)?;

    let chaincode = very_simple(Arc::new(TracingLogger::new(config.name.as_str())))?;
    let init = chaincode.initialize();
    tracing::debug!(%init, "initialized");

    Server::new(chaincode).serve_tcp(config.address.as_str()).await?;
    Ok(())
}
