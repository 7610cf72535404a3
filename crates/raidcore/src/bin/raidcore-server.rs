//! Raidcore server binary.
//!
//! Configuration comes from the environment:
//! - `PORT` — listen port, default 3000
//! - `RAIDCORE_ALLOWED_ORIGIN` — if set, only this browser origin may
//!   complete the websocket handshake
//! - `RUST_LOG` — tracing filter, default `info`

use raidcore::{RaidcoreError, RaidcoreServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RaidcoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let mut builder = RaidcoreServer::builder().bind(&addr);
    if let Ok(origin) = std::env::var("RAIDCORE_ALLOWED_ORIGIN") {
        builder = builder.allowed_origin(origin);
    }

    let server = builder.build().await?;
    tracing::info!(%addr, "raidcore listening");
    server.run().await
}
