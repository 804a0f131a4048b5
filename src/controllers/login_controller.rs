//! Autenticación y registro de usuarios

use crate::models::envelope::ApiResponse;
use crate::models::user::{LoginRequest, PublicUser, RegisterRequest};
use crate::repositories::UserRepository;
use crate::services::NotificationService;
use crate::state::AppState;
use crate::utils::errors::{is_unique_violation, AppError};
use crate::utils::jwt::{create_token, TokenConfig};
use crate::utils::password::{hash_password, verify_password};

pub struct LoginController {
    users: UserRepository,
    notifications: NotificationService,
    tokens: TokenConfig,
}

impl LoginController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            notifications: state.notifications.clone(),
            tokens: TokenConfig::from(&state.config),
        }
    }

    /// Iniciar sesión. El token emitido queda ligado a la IP del llamante.
    pub async fn login(&self, origin: &str, request: LoginRequest) -> Result<ApiResponse, AppError> {
        let Some(user) = self.users.find_by_email(&request.email).await? else {
            return Err(AppError::Unauthorized("user-pass-unk".to_string()));
        };

        if !verify_password(&request.password, &user.password)? {
            return Err(AppError::Unauthorized("user-pass-unk".to_string()));
        }

        let identity = PublicUser::from(user);
        let token = create_token(&identity, &self.tokens, origin)?;

        Ok(ApiResponse::text(200, "Sesión iniciada").with_token(token))
    }

    /// Registrar un usuario nuevo. El chequeo previo del email es solo un
    /// atajo: la restricción UNIQUE de la base es el punto de verdad y una
    /// violación en el INSERT responde igual que el chequeo.
    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse, AppError> {
        if self.users.email_exists(&request.email).await? {
            return Err(AppError::business("user-exists"));
        }

        let password_hash = hash_password(&request.password)?;

        let created = match self
            .users
            .create(&request.name, &request.email, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(AppError::Database(err)) if is_unique_violation(&err) => {
                return Err(AppError::business("user-exists"));
            }
            Err(err) => return Err(err),
        };

        self.notifications
            .user_registered(&created.name, &created.email)
            .await;

        Ok(ApiResponse::text(201, "user-created"))
    }
}
