use axum::extract::{Path, State};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Extension, Router};

use crate::controllers::home_controller::HomeController;
use crate::middleware::auth::{get_user_data, AuthenticatedUser};
use crate::models::envelope::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_home_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/tracking", get(tracking_list))
        .route("/tracking-auth/:unique_id", get(tracking_auth))
        .route_layer(from_fn_with_state(state, get_user_data));

    Router::new()
        .route("/", get(ready))
        // Consulta pública por código de tracking, sin autenticación
        .route("/tracking/:unique_id", get(tracking))
        .merge(protected)
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "Home controller Ready!")
}

async fn tracking(
    State(state): State<AppState>,
    Path(unique_id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let controller = HomeController::new(&state);
    controller.tracking(&unique_id).await
}

async fn tracking_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiResponse, AppError> {
    let controller = HomeController::new(&state);
    controller.tracking_list(&user).await
}

async fn tracking_auth(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(unique_id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let controller = HomeController::new(&state);
    controller.tracking_auth(&user, &unique_id).await
}
