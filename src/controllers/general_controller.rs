//! Datos de referencia: rutas con su vehículo

use crate::models::envelope::ApiResponse;
use crate::repositories::RouteRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct GeneralController {
    routes: RouteRepository,
}

impl GeneralController {
    pub fn new(state: &AppState) -> Self {
        Self {
            routes: RouteRepository::new(state.pool.clone()),
        }
    }

    pub async fn routes_with_vehicles(&self) -> Result<ApiResponse, AppError> {
        let routes = self.routes.list_with_vehicles().await?;

        Ok(ApiResponse::data_message(
            200,
            serde_json::to_value(&routes)?,
            "routes-with-vehicles",
        ))
    }
}
