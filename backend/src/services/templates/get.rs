//! Single-template fetch: id and keywords, or 404.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

#[derive(Debug, Serialize, PartialEq)]
pub struct TemplateInfo {
    pub id: i64,
    #[serde(rename = "keyWords")]
    pub key_words: Vec<String>,
}

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let info = get_template_info(&state.db, template_id.into_inner())?;
    Ok(HttpResponse::Ok().json(info))
}

pub fn get_template_info(db: &Db, id: i64) -> Result<TemplateInfo, ApiError> {
    let template = db.get_template(id)?.ok_or(ApiError::NotFound)?;
    Ok(TemplateInfo {
        id: template.id,
        key_words: template.key_words,
    })
}
