//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::SlidingWindowLimiter;
use platform::token::TokenIssuer;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// The token issuer and the login limiter are constructed here, once, from
/// the config; the limiter's window table lives for the router's lifetime.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let issuer = Arc::new(TokenIssuer::new(&config.token_secret, config.token_ttl));
    let limiter = Arc::new(SlidingWindowLimiter::new(config.login_limit.clone()));

    let state = AuthAppState {
        repo: repo.clone(),
        limiter,
        issuer: issuer.clone(),
    };

    let mw_state = AuthMiddlewareState { repo, issuer };

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route("/change-password", post(handlers::change_password::<R>))
        .route_layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = mw_state.clone();
                async move { require_auth(state, req, next).await }
            },
        ))
        .with_state(state.clone());

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
        .merge(protected)
}
