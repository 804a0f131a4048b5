//! Middleware de Rate Limiting
//!
//! Ventanas fijas por IP en memoria. Hay una instancia general para toda la
//! API y una más estricta para el login; cada instancia mantiene su propio
//! mapa de contadores.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Limitador general de la API
    pub fn general(config: &EnvironmentConfig) -> Self {
        Self::new(config.rate_limit_requests, config.rate_limit_window)
    }

    /// Limitador estricto para los endpoints de autenticación
    pub fn auth(config: &EnvironmentConfig) -> Self {
        Self::new(config.auth_rate_limit_requests, config.rate_limit_window)
    }

    /// Verificar si una IP ha excedido el límite de su ventana actual
    pub async fn check(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar ventanas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimitState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check(&addr.ip().to_string()).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_within_limit_pass() {
        let limiter = RateLimitState::new(3, 60);
        for _ in 0..3 {
            assert!(limiter.check("127.0.0.1").await.is_ok());
        }
        assert!(limiter.check("127.0.0.1").await.is_err());
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let limiter = RateLimitState::new(1, 60);
        assert!(limiter.check("10.0.0.1").await.is_ok());
        assert!(limiter.check("10.0.0.2").await.is_ok());
        assert!(limiter.check("10.0.0.1").await.is_err());
    }
}
