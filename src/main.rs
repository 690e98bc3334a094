//! Travel companion access & pricing service.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config ──▶ AppConfig (immutable)
//!                                  │
//!              ┌───────────────────┼────────────────────┐
//!              ▼                   ▼                    ▼
//!      routing::RouteAuthorizer  pricing::PlanCatalog  admin token
//!              │                   │
//!              ▼                   ▼
//!      gate / redirect      pricing::engine
//!              │                   │
//!              └──────▶ http::server (axum) ◀──────┘
//!                            │
//!              observability (tracing, metrics), lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;

use travel_companion::lifecycle::startup;

#[derive(Parser)]
#[command(name = "travel-companion")]
#[command(about = "Subscription pricing and route authorization service", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults are used when omitted).
    #[arg(short, long, env = "COMPANION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args.config.as_deref()).await?;
    Ok(())
}
