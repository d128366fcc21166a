//! zkbountyd - HTTP daemon for zkBounty evaluations.
//!
//! Thin transport layer over `zkbounty_core::BountyEvaluator`. The
//! evaluation history lives in the daemon's memory and is lost on
//! restart.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, Level};

use zkbounty_core::BountyEvaluator;

mod server;

use server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let json_logs = std::env::var("ZKBOUNTYD_LOG_FORMAT").is_ok_and(|v| v == "json");
    zkbounty_core::init_tracing(json_logs, Level::INFO);

    let addr: SocketAddr = std::env::var("ZKBOUNTYD_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .context("parse ZKBOUNTYD_ADDR")?;

    let state = AppState::new(Arc::new(BountyEvaluator::new()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(%addr, version = zkbounty_core::VERSION, "zkbountyd listening");

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
