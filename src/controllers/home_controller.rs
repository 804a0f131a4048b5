//! Tracking de envíos
//!
//! La consulta por código de tracking es pública: el `unique_id` es un
//! identificador no secuencial seguro de exponer. El listado y la variante
//! con validación de autoría requieren autenticación.

use crate::middleware::auth::AuthenticatedUser;
use crate::models::envelope::ApiResponse;
use crate::models::user::ADMIN_ROLE;
use crate::repositories::SendRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct HomeController {
    sends: SendRepository,
}

impl HomeController {
    pub fn new(state: &AppState) -> Self {
        Self {
            sends: SendRepository::new(state.pool.clone()),
        }
    }

    /// Consulta pública por código de tracking
    pub async fn tracking(&self, raw_unique_id: &str) -> Result<ApiResponse, AppError> {
        let unique_id = raw_unique_id
            .parse::<i64>()
            .map_err(|_| AppError::NotFound("tracking-not-found".to_string()))?;

        let send = self
            .sends
            .find_by_unique_id(unique_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tracking-not-found".to_string()))?;

        Ok(ApiResponse::data_message(
            200,
            serde_json::to_value(&send)?,
            "tracking-found",
        ))
    }

    /// Listado autenticado: los administradores ven todo, el resto solo lo
    /// propio
    pub async fn tracking_list(&self, user: &AuthenticatedUser) -> Result<ApiResponse, AppError> {
        let owner = if user.rol_id == ADMIN_ROLE {
            None
        } else {
            Some(user.id)
        };
        let sends = self.sends.list_for_owner(owner).await?;

        Ok(ApiResponse::data_message(
            200,
            serde_json::to_value(&sends)?,
            "sends-retrieved",
        ))
    }

    /// Consulta autenticada con validación de autoría
    pub async fn tracking_auth(
        &self,
        user: &AuthenticatedUser,
        raw_unique_id: &str,
    ) -> Result<ApiResponse, AppError> {
        let unique_id = raw_unique_id
            .parse::<i64>()
            .map_err(|_| AppError::NotFound("tracking-not-found".to_string()))?;

        let send = self
            .sends
            .find_by_unique_id(unique_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tracking-not-found".to_string()))?;

        if user.rol_id != ADMIN_ROLE && send.user_id != Some(user.id) {
            return Err(AppError::Forbidden("tracking-access-denied".to_string()));
        }

        Ok(ApiResponse::data_message(
            200,
            serde_json::to_value(&send)?,
            "tracking-found",
        ))
    }
}
