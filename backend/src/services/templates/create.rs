//! Template submission: multipart form with a `keyWords` text field, the
//! `pic` binary, and an optional `notForPublic` flag.
//!
//! The record is persisted before the asset is written. If the asset write
//! then fails, the record stays behind; that orphaned-metadata window is a
//! known property of the original service and is surfaced to the caller as
//! a storage error rather than rolled back.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::template::{Sender, TemplateState};
use futures_util::StreamExt;
use log::info;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::media::MediaStore;
use crate::search;
use crate::state::AppState;
use crate::store::Db;

pub struct CreateForm {
    pub key_words: String,
    pub pic: Vec<u8>,
    pub not_for_public: bool,
}

pub async fn process(
    state: web::Data<AppState>,
    identity: Option<Identity>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = read_form(payload).await?;
    let id = create_template(&state.db, &state.media, identity.map(|i| i.user_id), &form)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain")
        .body(id.to_string()))
}

/// Collects the multipart fields. `keyWords` and `pic` are required;
/// unknown fields are drained and ignored.
async fn read_form(mut payload: Multipart) -> Result<CreateForm, ApiError> {
    let mut key_words: Option<String> = None;
    let mut pic: Option<Vec<u8>> = None;
    let mut not_for_public = false;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        match name.as_deref() {
            Some("keyWords") => {
                key_words = Some(
                    String::from_utf8(bytes)
                        .map_err(|_| ApiError::BadRequest("keyWords must be UTF-8".into()))?,
                );
            }
            Some("pic") => pic = Some(bytes),
            Some("notForPublic") => {
                let value = String::from_utf8_lossy(&bytes).trim().to_lowercase();
                not_for_public = value == "true" || value == "1";
            }
            _ => {}
        }
    }

    Ok(CreateForm {
        key_words: key_words.ok_or_else(|| ApiError::BadRequest("missing keyWords field".into()))?,
        pic: pic.ok_or_else(|| ApiError::BadRequest("missing pic field".into()))?,
        not_for_public,
    })
}

/// Inserts the record and stores the asset keyed by the new id. Keywords go
/// through the same tokenizer as search queries.
pub fn create_template(
    db: &Db,
    media: &MediaStore,
    caller: Option<i64>,
    form: &CreateForm,
) -> Result<i64, ApiError> {
    if form.not_for_public && caller.is_none() {
        return Err(ApiError::BadRequest(
            "only authenticated users can upload private templates".into(),
        ));
    }

    let key_words = search::tokenize(&form.key_words);
    let state = if form.not_for_public {
        TemplateState::NonForPublic
    } else {
        TemplateState::Unchecked
    };

    let id = db.insert_template(&key_words, Sender::from_user_id(caller), state)?;
    media.store(id, &form.pic)?;
    info!("template {} created ({} keywords)", id, key_words.len());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn form(key_words: &str, not_for_public: bool) -> CreateForm {
        CreateForm {
            key_words: key_words.to_string(),
            pic: vec![1, 2, 3],
            not_for_public,
        }
    }

    #[test]
    fn anonymous_private_upload_is_a_bad_request() {
        let db = Db::open_in_memory().unwrap();
        let dir = tempdir().unwrap();
        let media = MediaStore::new(dir.path());

        assert!(matches!(
            create_template(&db, &media, None, &form("cat", true)),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn stores_normalized_keywords_and_asset() {
        let db = Db::open_in_memory().unwrap();
        let dir = tempdir().unwrap();
        let media = MediaStore::new(dir.path());

        let id = create_template(&db, &media, None, &form(" Cat, DOG. ", false)).unwrap();

        let template = db.get_template(id).unwrap().unwrap();
        assert_eq!(template.key_words, vec!["cat", "dog"]);
        assert_eq!(template.state, TemplateState::Unchecked);
        assert_eq!(template.sender, Sender::Anonymous);
        assert_eq!(media.retrieve(id).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn authenticated_private_upload_is_non_for_public() {
        let db = Db::open_in_memory().unwrap();
        let user = db.create_user("alice", "h").unwrap().unwrap();
        let dir = tempdir().unwrap();
        let media = MediaStore::new(dir.path());

        let id = create_template(&db, &media, Some(user), &form("cat", true)).unwrap();

        let template = db.get_template(id).unwrap().unwrap();
        assert_eq!(template.state, TemplateState::NonForPublic);
        assert_eq!(template.sender, Sender::OwnedBy(user));
    }
}
