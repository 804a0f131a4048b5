use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;

use crate::controllers::notification_controller::NotificationController;
use crate::models::envelope::ApiResponse;
use crate::models::notification::{BroadcastRequest, PrivateMessageRequest, SystemStatusRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/broadcast", post(broadcast))
        .route("/private", post(private_message))
        .route("/system-status", post(system_status))
        .route("/connected-users", get(connected_users))
        .route("/user-status/:email", get(user_status))
}

async fn broadcast(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BroadcastRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = NotificationController::new(&state);
    controller.broadcast(request).await
}

async fn private_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PrivateMessageRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = NotificationController::new(&state);
    controller.private_message(request).await
}

async fn system_status(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SystemStatusRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = NotificationController::new(&state);
    controller.system_status(request).await
}

async fn connected_users(State(state): State<AppState>) -> Result<ApiResponse, AppError> {
    let controller = NotificationController::new(&state);
    controller.connected_users().await
}

async fn user_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<ApiResponse, AppError> {
    let controller = NotificationController::new(&state);
    controller.user_status(&email).await
}
