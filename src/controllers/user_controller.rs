//! Usuarios: listado paginado

use crate::models::envelope::{ApiResponse, Pagination};
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct UserController {
    users: UserRepository,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
        }
    }

    pub async fn get_all_users(&self, page: i64, limit: i64) -> Result<ApiResponse, AppError> {
        let offset = (page - 1) * limit;
        let users = self.users.list(limit, offset).await?;
        let total = self.users.count().await?;

        Ok(
            ApiResponse::data_message(200, serde_json::to_value(&users)?, "users-retrieved")
                .with_pagination(Pagination::new(page, limit, total)),
        )
    }
}
