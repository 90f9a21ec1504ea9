//! Moderator rejection of a template. Ownerless submissions are removed
//! from the store; owned ones stay queryable as `Rejected`.

use actix_web::{web, HttpResponse};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::visibility;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    template_id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    identity.require_admin()?;
    visibility::reject(&state.db, template_id.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}
