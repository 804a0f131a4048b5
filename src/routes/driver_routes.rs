use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::controllers::driver_controller::DriverController;
use crate::middleware::auth::get_user_data;
use crate::models::driver::CreateDriverRequest;
use crate::models::envelope::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

pub fn create_driver_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/drivers", get(list_drivers))
        .route("/create", post(create_driver))
        .route_layer(from_fn_with_state(state, get_user_data));

    Router::new().route("/", get(ready)).merge(protected)
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "Drivers controller Ready!")
}

async fn list_drivers(State(state): State<AppState>) -> Result<ApiResponse, AppError> {
    let controller = DriverController::new(&state);
    controller.list().await
}

async fn create_driver(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> Result<ApiResponse, AppError> {
    let controller = DriverController::new(&state);
    controller.create(request).await
}
