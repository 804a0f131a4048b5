//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables ausentes caen a valores por defecto de desarrollo.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// URL pública de la aplicación, usada como issuer de los tokens
    pub app_url: String,
    /// Dominio del frontend permitido por CORS en producción
    pub front_domain: String,
    pub database_url: String,
    pub jwt_secret: String,
    /// Desplazamiento horario fijo de operación respecto a UTC, en horas
    pub utc_offset: i32,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub auth_rate_limit_requests: u32,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .to_lowercase(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            front_domain: env::var("FRONT_DOMAIN")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/send_tracking".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            utc_offset: env::var("APP_UTC_OFFSET")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(0),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(100),
            rate_limit_window: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(900),
            auth_rate_limit_requests: env::var("AUTH_RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "testing"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_development() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            app_url: "http://localhost:3000".to_string(),
            front_domain: "http://localhost:3001".to_string(),
            database_url: "postgres://localhost:5432/send_tracking".to_string(),
            jwt_secret: String::new(),
            utc_offset: 0,
            rate_limit_requests: 100,
            rate_limit_window: 900,
            auth_rate_limit_requests: 10,
        };
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
