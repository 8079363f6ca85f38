use anyhow::Context;
use coupon_api::{app, middleware::RateLimiter, AppState};
use coupon_core::CouponLookup;
use coupon_store::{Config, HttpCouponSource};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "coupon_api=debug,coupon_core=debug,coupon_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting coupon lookup API on port {}", config.server.port);

    let source = HttpCouponSource::new(config.operator_registry(), &config.upstream)
        .context("Failed to build operator client")?;

    let app_state = AppState {
        lookup: Arc::new(CouponLookup::new(Arc::new(source))),
        rate_limiter: Arc::new(RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_seconds),
        )),
    };

    let app = app(app_state);

    let addr = config
        .server
        .socket_addr()
        .with_context(|| format!("Invalid server host {:?}", config.server.host))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
