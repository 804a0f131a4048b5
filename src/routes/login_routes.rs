use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::controllers::login_controller::LoginController;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::models::envelope::ApiResponse;
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_login_router(state: AppState) -> Router<AppState> {
    let auth_limiter = RateLimitState::auth(&state.config);

    Router::new()
        .route("/", get(ready))
        .route("/login", post(login))
        .route("/register", post(register))
        .route_layer(from_fn_with_state(auth_limiter, rate_limit_middleware))
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "Login controller Ready!")
}

async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = LoginController::new(&state);
    controller.login(&addr.ip().to_string(), request).await
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = LoginController::new(&state);
    controller.register(request).await
}
