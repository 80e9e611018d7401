//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::middleware::{AuthMiddlewareState, require_auth};
use auth::{AuthConfig, PgAuthRepository};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use comments::{CommentConfig, PgCommentRepository};
use platform::rate_limit::RateLimitPolicy;
use platform::token::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,comments=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token secret: required in production, generated for development
    let token_secret = match env::var("TOKEN_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) if cfg!(debug_assertions) => {
            // Tokens from previous runs die with the process; fine for dev
            tracing::warn!("TOKEN_SECRET not set, using a random development secret");
            use rand::RngCore;
            let mut secret = vec![0u8; 32];
            rand::rng().fill_bytes(&mut secret);
            secret
        }
        Err(_) => anyhow::bail!("TOKEN_SECRET must be set in production"),
    };

    let auth_config = AuthConfig::new(
        token_secret,
        Duration::from_secs(env_u64("TOKEN_TTL_MINUTES", 120) * 60),
        RateLimitPolicy::new(
            env_u32("LOGIN_RATE_LIMIT_MAX", 5),
            env_u64("LOGIN_RATE_LIMIT_WINDOW_SECONDS", 300),
        ),
    );

    let comment_config = CommentConfig::new(RateLimitPolicy::new(
        env_u32("COMMENT_RATE_LIMIT_MAX", 5),
        env_u64("COMMENT_RATE_LIMIT_WINDOW_SECONDS", 60),
    ));

    // Repositories
    let auth_repo = PgAuthRepository::new(pool.clone());
    let comment_repo = PgCommentRepository::new(pool.clone());

    // Moderation routes sit behind the auth middleware
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        issuer: Arc::new(TokenIssuer::new(
            &auth_config.token_secret,
            auth_config.token_ttl,
        )),
    };

    let comment_state = comments::router::app_state(comment_repo, comment_config);

    let moderation_router = comments::router::moderation_comment_router_generic(
        comment_state.clone(),
    )
    .layer(axum::middleware::from_fn(
        move |req: axum::extract::Request, next: axum::middleware::Next| {
            let state = mw_state.clone();
            async move { require_auth(state, req, next).await }
        },
    ));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth::auth_router(auth_repo, auth_config))
        .nest(
            "/api/comments",
            comments::router::public_comment_router_generic(comment_state),
        )
        .nest("/api/admin/comments", moderation_router)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env_u64("PORT", 8000) as u16;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
