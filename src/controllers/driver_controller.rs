//! Conductores: listado y alta

use crate::models::driver::CreateDriverRequest;
use crate::models::envelope::ApiResponse;
use crate::repositories::DriverRepository;
use crate::state::AppState;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct DriverController {
    drivers: DriverRepository,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            drivers: DriverRepository::new(state.pool.clone()),
        }
    }

    pub async fn list(&self) -> Result<ApiResponse, AppError> {
        let drivers = self.drivers.list_all().await?;

        Ok(ApiResponse::data_text(
            200,
            serde_json::to_value(&drivers)?,
            "drivers-retrieved",
        ))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<ApiResponse, AppError> {
        if self.drivers.cifnif_exists(&request.cifnif).await? {
            return Err(AppError::Conflict("existing-driver".to_string()));
        }

        let created = match self.drivers.create(&request.cifnif, &request.name).await {
            Ok(driver) => driver,
            Err(AppError::Database(err)) if is_unique_violation(&err) => {
                return Err(AppError::Conflict("existing-driver".to_string()));
            }
            Err(err) => return Err(err),
        };

        Ok(ApiResponse::data_text(
            201,
            serde_json::to_value(&created)?,
            "driver-created",
        ))
    }
}
