//! Credential hashing, bearer-token issuance and the `Identity` extractor.
//!
//! Tokens are HS256 JWTs carrying the user id as `sub` and, for admins, a
//! `role` claim. Handlers that require authentication take `Identity` as an
//! extractor argument; handlers that merely adapt to it take
//! `Option<Identity>`, which actix resolves to `None` when extraction
//! fails. The core trusts a verified token completely and never goes back
//! to the database to re-check it.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::future::{ready, Ready};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

const ADMIN_ROLE: &str = "Admin";

/// The resolved caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub is_admin: bool,
}

impl Identity {
    /// Fails with `Forbidden` unless the caller holds the moderator
    /// capability.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    iss: String,
    aud: String,
    iat: u64,
    exp: u64,
}

/// SHA-256 digest of a password, uppercase hex.
pub fn hash_password(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    digest.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Signs a token for the given user. Admins get the role claim; everyone
/// else gets a plain identity token.
pub fn issue_token(cfg: &JwtConfig, user_id: i64, is_admin: bool) -> Result<String, ApiError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let claims = Claims {
        sub: user_id.to_string(),
        role: is_admin.then(|| ADMIN_ROLE.to_string()),
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        iat: now,
        exp: now + cfg.ttl_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|_| ApiError::Unauthorized)
}

/// Verifies a token's signature, issuer, audience and expiry, and turns it
/// into an `Identity`. Any failure is `Unauthorized`.
pub fn verify_token(cfg: &JwtConfig, token: &str) -> Result<Identity, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&cfg.issuer]);
    validation.set_audience(&[&cfg.audience]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthorized)?;

    let user_id = data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| ApiError::Unauthorized)?;

    Ok(Identity {
        user_id,
        is_admin: data.claims.role.as_deref() == Some(ADMIN_ROLE),
    })
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(ApiError::Unauthorized)?;
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized)?
        .to_str()
        .map_err(|_| ApiError::Unauthorized)?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;
    verify_token(&state.config.jwt, token)
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Identity, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}
