//! Hashing de contraseñas con bcrypt, factor de trabajo 12

use crate::utils::errors::AppError;

const BCRYPT_COST: u32 = 12;

/// Hashear una contraseña
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(AppError::from)
}

/// Validar una contraseña contra un hash guardado previamente
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_matching_password() {
        // Costo bajo para mantener el test rápido
        let hash = bcrypt::hash("secreta123", 4).unwrap();
        assert!(verify_password("secreta123", &hash).unwrap());
        assert!(!verify_password("otra-cosa", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("secreta123", "no-es-un-hash").is_err());
    }
}
