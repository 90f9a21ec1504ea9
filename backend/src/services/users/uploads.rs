//! The caller's own submissions, in every moderation state.

use actix_web::{web, HttpResponse};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, ApiError> {
    let ids = list_uploads(&state.db, identity.user_id)?;
    Ok(HttpResponse::Ok().json(ids))
}

pub fn list_uploads(db: &Db, user_id: i64) -> Result<Vec<i64>, ApiError> {
    Ok(db.list_by_sender(user_id)?.iter().map(|t| t.id).collect())
}
