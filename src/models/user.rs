//! Modelo de User
//!
//! Mapea a la tabla main_users. El rol 1 es administrador con visibilidad
//! total; cualquier otro rol queda restringido a sus propios envíos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const ADMIN_ROLE: i32 = 1;
pub const DEFAULT_ROLE: i32 = 2;

/// Fila completa de main_users, incluye el hash de contraseña
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub rol_id: i32,
}

/// Identidad pública: viaja dentro del token y en los listados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub rol_id: i32,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            rol_id: user.rol_id,
        }
    }
}

/// Email y nombre del propietario, para el despacho de notificaciones
#[derive(Debug, Clone, FromRow)]
pub struct UserIdentity {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "length must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,

    #[validate(email(message = "must be a valid email"))]
    pub email: String,

    #[validate(length(min = 8, message = "length must be at least 8 characters long"))]
    pub password: String,
}
