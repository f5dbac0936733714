use std::error::Error;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pigroute::planner::Planner;
use pigroute::transport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env()) // Reads RUST_LOG
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();

    dotenv().ok();
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{host}:{port}");

    let app = transport::router(Arc::new(Planner::default()));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pigroute listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
