//! The caller's favorites: list, add, remove.
//!
//! Adding is idempotent (a repeat add answers 200 without duplicating the
//! relation) while removing a favorite that is not there is a conflict.
//! That asymmetry comes from the original service and is kept on purpose.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Db;

#[derive(Deserialize)]
pub struct FavoriteParams {
    /// Template id, passed as `?template=`.
    pub template: i64,
}

pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, ApiError> {
    let ids = state.db.favorite_ids(identity.user_id)?;
    Ok(HttpResponse::Ok().json(ids))
}

pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<FavoriteParams>,
) -> Result<HttpResponse, ApiError> {
    let newly_added = add_favorite(&state.db, identity.user_id, params.template)?;
    if newly_added {
        Ok(HttpResponse::Ok().finish())
    } else {
        Ok(HttpResponse::Ok().body("Template already added"))
    }
}

pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<FavoriteParams>,
) -> Result<HttpResponse, ApiError> {
    remove_favorite(&state.db, identity.user_id, params.template)?;
    Ok(HttpResponse::Ok().finish())
}

/// Adds the template to the user's favorites. Returns whether the relation
/// was newly created.
pub fn add_favorite(db: &Db, user_id: i64, template_id: i64) -> Result<bool, ApiError> {
    if db.get_user(user_id)?.is_none() {
        return Err(ApiError::NotFound);
    }
    if !db.template_exists(template_id)? {
        return Err(ApiError::NotFound);
    }
    Ok(db.add_favorite(user_id, template_id)?)
}

pub fn remove_favorite(db: &Db, user_id: i64, template_id: i64) -> Result<(), ApiError> {
    if !db.remove_favorite(user_id, template_id)? {
        return Err(ApiError::Conflict("template is not in favorites".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::template::{Sender, TemplateState};

    fn seed(db: &Db) -> (i64, i64) {
        let user = db.create_user("alice", "h").unwrap().unwrap();
        let template = db
            .insert_template(&[], Sender::Anonymous, TemplateState::Approved)
            .unwrap();
        (user, template)
    }

    #[test]
    fn double_add_does_not_duplicate() {
        let db = Db::open_in_memory().unwrap();
        let (user, template) = seed(&db);

        assert!(add_favorite(&db, user, template).unwrap());
        assert!(!add_favorite(&db, user, template).unwrap());
        assert_eq!(db.favorite_ids(user).unwrap(), vec![template]);
    }

    #[test]
    fn add_of_unknown_template_is_not_found() {
        let db = Db::open_in_memory().unwrap();
        let (user, _) = seed(&db);
        assert!(matches!(
            add_favorite(&db, user, 999),
            Err(ApiError::NotFound)
        ));
    }

    #[test]
    fn remove_of_unfavorited_template_is_a_conflict() {
        let db = Db::open_in_memory().unwrap();
        let (user, template) = seed(&db);

        assert!(matches!(
            remove_favorite(&db, user, template),
            Err(ApiError::Conflict(_))
        ));

        add_favorite(&db, user, template).unwrap();
        remove_favorite(&db, user, template).unwrap();
        assert!(db.favorite_ids(user).unwrap().is_empty());
    }

    #[test]
    fn favoriting_someone_elses_template_is_allowed() {
        let db = Db::open_in_memory().unwrap();
        let owner = db.create_user("owner", "h").unwrap().unwrap();
        let fan = db.create_user("fan", "h").unwrap().unwrap();
        let template = db
            .insert_template(&[], Sender::OwnedBy(owner), TemplateState::Approved)
            .unwrap();

        assert!(add_favorite(&db, fan, template).unwrap());
        assert_eq!(db.favorite_ids(fan).unwrap(), vec![template]);
    }
}
