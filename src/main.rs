// Survey rewards API server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, Router};
use http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_rewards_api::config::AppConfig;
use survey_rewards_api::handlers::{
    get_next_question, get_wallet, health_check, post_answer, request_withdrawal, AppContext,
    USER_ID_HEADER,
};

fn load_env() {
    dotenv::dotenv().ok();
}

#[tokio::main]
async fn main() {
    load_env();
    // Configure logging with tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded");

    // Wire stores and services
    let context = AppContext::new(config.clone());

    // Seed the question catalog on first boot
    let seeded = context
        .questions
        .seed_questions()
        .await
        .expect("Failed to seed question catalog");
    if seeded > 0 {
        tracing::info!("Seeded {} questions", seeded);
    }

    let app_state = Arc::new(context);

    // Configure CORS policy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .max_age(Duration::from_secs(3600));

    // Set up API routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/surveys/next", get(get_next_question))
        .route("/api/surveys/answer", post(post_answer))
        .route("/api/wallet", get(get_wallet))
        .route("/api/wallet/withdraw", post(request_withdrawal))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Parse server address from config
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
