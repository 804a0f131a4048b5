use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::controllers::general_controller::GeneralController;
use crate::middleware::auth::get_user_data;
use crate::models::envelope::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_general_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/routes", get(routes_with_vehicles))
        .route_layer(from_fn_with_state(state, get_user_data));

    Router::new().route("/", get(ready)).merge(protected)
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "General controller Ready!")
}

async fn routes_with_vehicles(State(state): State<AppState>) -> Result<ApiResponse, AppError> {
    let controller = GeneralController::new(&state);
    controller.routes_with_vehicles().await
}
