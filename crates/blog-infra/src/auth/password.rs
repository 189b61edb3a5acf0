//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use blog_core::ports::{AuthError, PasswordService};

/// Argon2-based password service. Every hash gets its own random salt.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(service.verify("secret1", &hash));
        assert!(!service.verify("wrong_password", &hash));
    }

    #[test]
    fn test_salt_differs_per_call() {
        let service = Argon2PasswordService::new();

        assert_ne!(
            service.hash("secret1").unwrap(),
            service.hash("secret1").unwrap()
        );
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let service = Argon2PasswordService::new();

        assert!(!service.verify("secret1", "not-a-phc-string"));
    }
}
