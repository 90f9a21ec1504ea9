//! Moderation queue: ids of templates awaiting review. Admin only.

use actix_web::{web, HttpResponse};
use common::model::template::TemplateState;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, ApiError> {
    identity.require_admin()?;
    let ids = list_unchecked(&state.db)?;
    Ok(HttpResponse::Ok().json(ids))
}

pub fn list_unchecked(db: &Db) -> Result<Vec<i64>, ApiError> {
    Ok(db
        .list_by_state(TemplateState::Unchecked)?
        .iter()
        .map(|t| t.id)
        .collect())
}
