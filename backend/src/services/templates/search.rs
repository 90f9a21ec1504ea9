//! Keyword search over the caller's visible templates.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::search;
use crate::state::AppState;
use crate::store::Db;
use crate::visibility;

#[derive(Deserialize)]
pub struct SearchParams {
    q: String,
}

pub async fn process(
    state: web::Data<AppState>,
    identity: Option<Identity>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, ApiError> {
    let ids = search_templates(&state.db, identity.map(|i| i.user_id), &params.q)?;
    Ok(HttpResponse::Ok().json(ids))
}

/// Ranks the templates visible to `caller` against the query. The candidate
/// set is the approved templates plus the caller's own submissions in any
/// state when authenticated.
pub fn search_templates(db: &Db, caller: Option<i64>, query: &str) -> Result<Vec<i64>, ApiError> {
    let candidates = visibility::visible_templates(db, caller)?;
    Ok(search::rank(&candidates, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::template::{Sender, TemplateState};

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranks_double_match_first() {
        let db = Db::open_in_memory().unwrap();
        let both = db
            .insert_template(
                &words(&["cat", "dog"]),
                Sender::Anonymous,
                TemplateState::Approved,
            )
            .unwrap();
        let dog_only = db
            .insert_template(&words(&["dog"]), Sender::Anonymous, TemplateState::Approved)
            .unwrap();

        assert_eq!(
            search_templates(&db, None, "cat, DOG.").unwrap(),
            vec![both, dog_only]
        );
    }

    #[test]
    fn anonymous_search_skips_unapproved() {
        let db = Db::open_in_memory().unwrap();
        db.insert_template(&words(&["cat"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();

        assert!(search_templates(&db, None, "cat").unwrap().is_empty());
    }

    #[test]
    fn owner_matches_own_unapproved_submissions() {
        let db = Db::open_in_memory().unwrap();
        let user = db.create_user("alice", "h").unwrap().unwrap();
        let own = db
            .insert_template(
                &words(&["cat"]),
                Sender::OwnedBy(user),
                TemplateState::NonForPublic,
            )
            .unwrap();

        assert_eq!(search_templates(&db, Some(user), "cat").unwrap(), vec![own]);
        assert!(search_templates(&db, Some(user + 1), "cat")
            .unwrap()
            .is_empty());
    }
}
