use sqlx::PgPool;

use crate::models::driver::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT id, cifnif, name FROM main_drivers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM main_drivers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn cifnif_exists(&self, cifnif: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM main_drivers WHERE cifnif = $1)")
                .bind(cifnif)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn create(&self, cifnif: &str, name: &str) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO main_drivers (cifnif, name)
            VALUES ($1, $2)
            RETURNING id, cifnif, name
            "#,
        )
        .bind(cifnif)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }
}
