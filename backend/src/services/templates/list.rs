//! Public template listing: approved ids only, newest first.

use actix_web::{web, HttpResponse};
use common::model::template::TemplateState;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

#[derive(Deserialize)]
pub struct ListParams {
    offset: Option<usize>,
    limit: Option<usize>,
}

pub async fn process(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let ids = list_approved(&state.db, params.offset, params.limit)?;
    Ok(HttpResponse::Ok().json(ids))
}

/// Ids of approved templates, newest first. Pagination only applies when
/// both `offset` and `limit` are given, matching the original service.
pub fn list_approved(
    db: &Db,
    offset: Option<usize>,
    limit: Option<usize>,
) -> Result<Vec<i64>, ApiError> {
    let templates = db.list_by_state(TemplateState::Approved)?;
    let ids = templates.iter().map(|t| t.id);

    let ids = match (offset, limit) {
        (Some(offset), Some(limit)) => ids.skip(offset).take(limit).collect(),
        _ => ids.collect(),
    };
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::template::Sender;

    fn seed_approved(db: &Db, count: usize) -> Vec<i64> {
        (0..count)
            .map(|_| {
                db.insert_template(&[], Sender::Anonymous, TemplateState::Approved)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn lists_only_approved_newest_first() {
        let db = Db::open_in_memory().unwrap();
        let approved = seed_approved(&db, 3);
        db.insert_template(&[], Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();

        let ids = list_approved(&db, None, None).unwrap();
        assert_eq!(ids, vec![approved[2], approved[1], approved[0]]);
    }

    #[test]
    fn pagination_needs_both_parameters() {
        let db = Db::open_in_memory().unwrap();
        let approved = seed_approved(&db, 5);

        // offset alone is ignored
        assert_eq!(list_approved(&db, Some(2), None).unwrap().len(), 5);
        // offset+limit slice the newest-first sequence
        let page = list_approved(&db, Some(1), Some(2)).unwrap();
        assert_eq!(page, vec![approved[3], approved[2]]);
    }
}
