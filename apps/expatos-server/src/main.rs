//! ExpatOS Server
//!
//! HTTP surface for the document dependency engine. Provides REST API
//! endpoints for:
//!
//! - Dependency analysis and health scoring
//! - Expiry timelines
//! - Document type listing
//!
//! ## Architecture
//!
//! Every request is analysed from scratch; the server keeps no documents
//! between calls. Per-IP rate limiting is applied via tower-governor.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_analyze, handle_health, handle_list_document_types, handle_timeline};

/// Command-line arguments for the ExpatOS server
#[derive(Parser, Debug)]
#[command(name = "expatos-server")]
#[command(about = "ExpatOS document dependency analysis server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "EXPATOS_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "EXPATOS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "EXPATOS_RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Reject duplicate document types unless a request overrides it
    #[arg(long, env = "EXPATOS_STRICT")]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Default duplicate handling for /api/analyze
    pub strict: bool,
}

/// Routes and CORS, without rate limiting
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/document-types", get(handle_list_document_types))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/timeline", post(handle_timeline))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ExpatOS server on {}:{}", args.host, args.port);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("rate limit must be greater than zero")?,
    );

    let state = AppState {
        strict: args.strict,
    };

    let app = app(state).layer(GovernorLayer {
        config: governor_conf,
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Strict duplicate handling: {}", args.strict);

    // Peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
