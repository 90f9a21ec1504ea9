//! Login: matches login + password digest and answers with a token. Admins
//! get the role claim here, which is what unlocks the moderation routes.

use actix_web::{web, HttpResponse};
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
    let token = login(&state.db, &state.config.jwt, &params.login, &params.password)?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(token))
}

pub fn login(db: &Db, jwt: &JwtConfig, login: &str, password: &str) -> Result<String, ApiError> {
    let hashed = auth::hash_password(password);
    let user = db
        .find_user_by_credentials(login, &hashed)?
        .ok_or(ApiError::NotFound)?;
    auth::issue_token(jwt, user.id, user.is_admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::users::register;

    #[test]
    fn wrong_password_is_not_found() {
        let db = Db::open_in_memory().unwrap();
        let jwt = AppConfig::for_tests("unused").jwt;
        register::register(&db, &jwt, "alice", "pw").unwrap();

        assert!(matches!(
            login(&db, &jwt, "alice", "wrong"),
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            login(&db, &jwt, "nobody", "pw"),
            Err(ApiError::NotFound)
        ));
    }

    #[test]
    fn login_round_trips_through_registration() {
        let db = Db::open_in_memory().unwrap();
        let jwt = AppConfig::for_tests("unused").jwt;
        register::register(&db, &jwt, "alice", "pw").unwrap();

        let token = login(&db, &jwt, "alice", "pw").unwrap();
        let identity = auth::verify_token(&jwt, &token).unwrap();
        assert!(!identity.is_admin);
    }
}
