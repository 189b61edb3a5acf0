//! Authentication extractor.
//!
//! Declaring an [`Identity`] argument is what protects a handler: the token
//! is verified during extraction, and on failure the handler never runs.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use blog_core::ports::{AuthError, TokenClaims, TokenService};
use blog_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("{0}")]
    Rejected(#[from] AuthError),
    #[error("application state is not registered")]
    Misconfigured,
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthenticationError::Rejected(AuthError::HashingError(_))
            | AuthenticationError::Misconfigured => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthenticationError::Rejected(_) => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let AuthenticationError::Rejected(reason) = self else {
            return actix_web::HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error());
        };

        let error = match reason {
            AuthError::MissingAuth => ErrorResponse::unauthorized(
                "missing token: provide 'Authorization: Bearer <token>'",
            ),
            AuthError::TokenExpired => {
                ErrorResponse::unauthorized("token expired, please login again")
            }
            AuthError::InvalidSignature | AuthError::MalformedToken(_) => {
                ErrorResponse::unauthorized("invalid token")
            }
            AuthError::InvalidCredentials => {
                ErrorResponse::unauthorized("invalid username or password")
            }
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Strip an optional `Bearer ` prefix; a bare token is accepted as is.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Run the gate against a request: no token, bad token or valid identity.
pub fn authenticate(req: &HttpRequest, tokens: &dyn TokenService) -> Result<Identity, AuthError> {
    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::MalformedToken("non-ASCII authorization header".to_string()))?;

    let token = bearer_token(auth_str).ok_or(AuthError::MissingAuth)?;

    tokens.verify(token).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AuthenticationError::Misconfigured));
        };

        let result = authenticate(req, state.tokens.as_ref()).map_err(|e| {
            tracing::debug!(error = %e, path = req.path(), "Request rejected by auth gate");
            AuthenticationError::Rejected(e)
        });

        ready(result)
    }
}
