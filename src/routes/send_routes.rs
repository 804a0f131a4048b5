use axum::extract::{Path, State};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::{Extension, Router};

use crate::controllers::send_controller::SendController;
use crate::middleware::auth::{get_user_data, AuthenticatedUser};
use crate::models::envelope::ApiResponse;
use crate::models::send::{CreateSendRequest, SendFilterRequest, UpdateSendRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_send_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/getSendsFiltered", post(get_sends_filtered))
        .route("/create", post(create_send))
        .route("/update/:id", put(update_send))
        .route_layer(from_fn_with_state(state, get_user_data));

    Router::new().route("/", get(ready)).merge(protected)
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "Sends controller Ready!")
}

async fn get_sends_filtered(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(filter): ValidatedJson<SendFilterRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = SendController::new(&state);
    controller.get_sends_filtered(&user, filter).await
}

async fn create_send(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateSendRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = SendController::new(&state);
    controller.create_send(&user, request).await
}

async fn update_send(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateSendRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = SendController::new(&state);
    controller.update_send(&user, &id, patch).await
}
