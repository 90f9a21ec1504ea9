//! Account creation. The new user is never an admin; admin accounts are
//! provisioned directly in the database.

use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;

use crate::auth;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

#[derive(Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

pub async fn process(
    state: web::Data<AppState>,
    params: web::Query<Credentials>,
) -> Result<HttpResponse, ApiError> {
    let token = register(&state.db, &state.config.jwt, &params.login, &params.password)?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(token))
}

/// Creates the account and returns a signed token for it. The taken-login
/// check answers most duplicates early; the UNIQUE constraint on the login
/// settles any race, so two concurrent registrations cannot both win.
pub fn register(
    db: &Db,
    jwt: &JwtConfig,
    login: &str,
    password: &str,
) -> Result<String, ApiError> {
    if db.find_user_by_login(login)?.is_some() {
        return Err(ApiError::Conflict("Login already exists".into()));
    }

    let hashed = auth::hash_password(password);
    let user_id = db
        .create_user(login, &hashed)?
        .ok_or_else(|| ApiError::Conflict("Login already exists".into()))?;
    info!("registered user {} ({})", user_id, login);
    auth::issue_token(jwt, user_id, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn duplicate_registration_is_a_conflict() {
        let db = Db::open_in_memory().unwrap();
        let jwt = AppConfig::for_tests("unused").jwt;

        register(&db, &jwt, "alice", "pw").unwrap();
        assert!(matches!(
            register(&db, &jwt, "alice", "pw"),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn returned_token_identifies_the_new_user() {
        let db = Db::open_in_memory().unwrap();
        let jwt = AppConfig::for_tests("unused").jwt;

        let token = register(&db, &jwt, "alice", "pw").unwrap();
        let identity = auth::verify_token(&jwt, &token).unwrap();

        let stored = db.find_user_by_login("alice").unwrap().unwrap();
        assert_eq!(identity.user_id, stored.id);
        assert!(!identity.is_admin);
    }
}
