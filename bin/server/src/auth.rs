use crate::constants::ADMIN_ROLE;
use crate::handlers::error::handle_auth_error;
use crate::state::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::middleware::Next;
use actix_web::{web, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Claims carried by admin bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Admin role required")]
    Forbidden,
}

/// Handles bearer token verification for the admin endpoints
pub struct AuthVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl AuthVerifier {
    /// Verifier for HS256 tokens signed with `secret`
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: Some(DecodingKey::from_secret(secret.as_bytes())),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifier that lets every request through
    pub fn disabled() -> Self {
        Self {
            decoding_key: None,
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Require an admin token on the request.
    /// Returns the claims, or None when the guard is disabled.
    pub fn authorize_admin(&self, req: &HttpRequest) -> Result<Option<Claims>, AuthError> {
        let Some(key) = &self.decoding_key else {
            return Ok(None);
        };

        let token = Self::bearer_token(req).ok_or(AuthError::MissingToken)?;
        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.role != ADMIN_ROLE {
            return Err(AuthError::Forbidden);
        }

        Ok(Some(claims))
    }

    /// Extract the token from `Authorization: Bearer <token>`
    fn bearer_token(req: &HttpRequest) -> Option<&str> {
        let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Scope middleware for the admin endpoints. Runs before any extractor,
/// so rejected requests never have their body read.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let outcome = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.auth.authorize_admin(req.request()),
        None => Ok(None),
    };

    match outcome {
        Ok(Some(claims)) => debug!(sub = ?claims.sub, "Admin request authorized"),
        Ok(None) => {}
        Err(e) => {
            let response = req.error_response(handle_auth_error(e));
            return Ok(response.map_into_right_body());
        }
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
