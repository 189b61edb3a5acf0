//! Authentication ports: token issuance/verification and password hashing.

/// Claims carried inside an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i32,
    pub username: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Token service trait for signed, time-limited identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user.
    fn issue(&self, user_id: i32, username: &str) -> Result<String, AuthError>;

    /// Verify a token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a password against a stored hash. A malformed hash never matches.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("hashing error: {0}")]
    HashingError(String),
}
