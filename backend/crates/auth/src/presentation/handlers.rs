//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, Extension, State};
use axum::http::HeaderMap;
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::source_address;
use platform::rate_limit::SlidingWindowLimiter;
use platform::token::TokenIssuer;

use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CurrentUser, LoginInput, LoginUseCase,
};
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, OkResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub issuer: Arc<TokenIssuer>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let source = source_address(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.issuer.clone(),
    );

    let input = LoginInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input, &source).await?;

    Ok(Json(LoginResponse::bearer(output.access_token)))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username.as_str().to_string(),
    })
}

// ============================================================================
// Change password
// ============================================================================

/// POST /api/auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone());

    let input = ChangePasswordInput {
        old_password: req.old_password,
        new_password: req.new_password,
    };

    use_case.execute(&user.username, input).await?;

    Ok(Json(OkResponse::ok()))
}
