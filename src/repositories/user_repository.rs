use sqlx::PgPool;

use crate::models::user::{PublicUser, User, UserIdentity, DEFAULT_ROLE};
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, rol_id FROM main_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM main_users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<PublicUser, AppError> {
        let user = sqlx::query_as::<_, PublicUser>(
            r#"
            INSERT INTO main_users (name, email, password, rol_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, rol_id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(DEFAULT_ROLE)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PublicUser>, AppError> {
        let users = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, name, email, rol_id FROM main_users
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM main_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Email y nombre del usuario, para resolver al destinatario de una
    /// notificación sin cargar el hash de contraseña
    pub async fn find_identity(&self, id: i32) -> Result<Option<UserIdentity>, AppError> {
        let identity =
            sqlx::query_as::<_, UserIdentity>("SELECT email, name FROM main_users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(identity)
    }
}
