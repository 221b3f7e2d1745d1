use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use lpp_api::{
    config::ApiConfig,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{
        cors::create_cors_layer,
        rate_limit::{RateLimit, apply_rate_limit},
        request_id::request_id_middleware,
        security_headers::apply_security_headers,
    },
    state::ApiState,
    tracing::init_tracing,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);

    // Scoring policies are validated once, at startup
    let state = ApiState::new(&config)?;

    let metrics_handle = init_metrics()?;
    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = apply_rate_limit(lpp_api::router::router(), RateLimit::default());

    let app = api
        .merge(metrics_app)
        .with_state(state)
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(trace_layer)
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware));
    let app = apply_security_headers(app, config.env);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %config.bind_address(),
        environment = ?config.env,
        "scoring service listening"
    );

    // Connect info lets the rate limiter fall back to the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
