//! Utilidades JWT
//!
//! Tokens firmados HS256 con la identidad embebida bajo el claim `data`,
//! issuer fijo a la URL de la aplicación, subject fijo y audiencia ligada al
//! origen del llamante (su dirección IP). La decodificación verifica firma,
//! audiencia y expiración en un solo paso.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Vida útil del token: 12 horas
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 12;
pub const TOKEN_SUBJECT: &str = "Login";

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub app_url: String,
}

impl From<&EnvironmentConfig> for TokenConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            app_url: config.app_url.clone(),
        }
    }
}

/// Claims del token con payload genérico bajo `data`
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims<T> {
    pub data: T,
    pub iss: String,
    pub sub: String,
    pub aud: Vec<String>,
    pub iat: usize,
    pub exp: usize,
}

/// Generar un token para el payload dado, ligado al origen del llamante
pub fn create_token<T: Serialize>(
    data: &T,
    config: &TokenConfig,
    origin: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = TokenClaims {
        data,
        iss: config.app_url.clone(),
        sub: TOKEN_SUBJECT.to_string(),
        aud: vec![origin.to_string()],
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key).map_err(AppError::from)
}

/// Verificar y decodificar un token. Falla cerrado: firma inválida, audiencia
/// que no contiene el origen o expiración vencida son todos `AppError::Jwt`.
pub fn decode_token<T: DeserializeOwned>(
    token: &str,
    config: &TokenConfig,
    origin: &str,
) -> Result<TokenClaims<T>, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[origin]);

    let token_data = decode::<TokenClaims<T>>(token, &decoding_key, &validation)?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::PublicUser;

    fn test_config() -> TokenConfig {
        TokenConfig {
            secret: "secreto-de-pruebas".to_string(),
            app_url: "http://localhost:3000".to_string(),
        }
    }

    fn test_user() -> PublicUser {
        PublicUser {
            id: 7,
            name: "Ana Gómez".to_string(),
            email: "ana@mail.com".to_string(),
            rol_id: 2,
        }
    }

    #[test]
    fn test_round_trip_recovers_payload() {
        let config = test_config();
        let token = create_token(&test_user(), &config, "127.0.0.1").unwrap();

        let claims = decode_token::<PublicUser>(&token, &config, "127.0.0.1").unwrap();
        assert_eq!(claims.data.id, 7);
        assert_eq!(claims.data.email, "ana@mail.com");
        assert_eq!(claims.sub, TOKEN_SUBJECT);
        assert_eq!(claims.iss, config.app_url);
        assert_eq!(claims.aud, vec!["127.0.0.1".to_string()]);
    }

    #[test]
    fn test_origin_mismatch_is_rejected() {
        let config = test_config();
        let token = create_token(&test_user(), &config, "127.0.0.1").unwrap();

        assert!(decode_token::<PublicUser>(&token, &config, "10.0.0.9").is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = test_config();
        let token = create_token(&test_user(), &config, "127.0.0.1").unwrap();

        let other = TokenConfig {
            secret: "otro-secreto".to_string(),
            ..config
        };
        assert!(decode_token::<PublicUser>(&token, &other, "127.0.0.1").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let config = test_config();
        assert!(decode_token::<PublicUser>("no-es-un-token", &config, "127.0.0.1").is_err());
    }
}
