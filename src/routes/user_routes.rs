use axum::extract::{Query, State};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::controllers::user_controller::UserController;
use crate::middleware::auth::get_user_data;
use crate::models::envelope::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Paginación por query string, tolerante a valores no numéricos
#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl PageQuery {
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|value| value.parse().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|value| value.parse().ok())
            .filter(|limit| (1..=100).contains(limit))
            .unwrap_or(20)
    }
}

pub fn create_user_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/getAllUsers", get(get_all_users))
        .route_layer(from_fn_with_state(state, get_user_data));

    Router::new().route("/", get(ready)).merge(protected)
}

pub(crate) async fn ready() -> ApiResponse {
    ApiResponse::message(200, "Users controller Ready!")
}

async fn get_all_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse, AppError> {
    let controller = UserController::new(&state);
    controller.get_all_users(query.page(), query.limit()).await
}
