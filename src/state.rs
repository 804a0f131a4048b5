//! Shared application state
//!
//! Este módulo define el estado compartido que se pasa a través del router
//! de Axum. El registro de conexiones y el despachador de notificaciones se
//! construyen una vez aquí y se inyectan a quien los necesite.

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::services::NotificationService;
use crate::socket::SocketManager;
use crate::utils::jwt::TokenConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub socket: SocketManager,
    pub notifications: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let socket = SocketManager::new(TokenConfig::from(&config));
        let notifications = NotificationService::new(socket.clone());
        Self {
            pool,
            config,
            socket,
            notifications,
        }
    }
}
