//! # Template endpoints
//!
//! Everything under `/templates`: public browsing and search, the
//! moderation queue, and upload/download of the binary assets.
//!
//! ## Registered routes
//!
//! *   **`GET /templates`** — ids of approved templates, newest first,
//!     with optional `offset`/`limit` pagination.
//! *   **`GET /templates/search?q=`** — ids ranked by keyword relevance;
//!     authenticated callers also match their own unlisted submissions.
//! *   **`GET /templates/unchecked`** — moderation queue (admin only).
//! *   **`GET /templates/approve/{id}`** — approve a template (admin only).
//! *   **`GET /templates/reject/{id}`** — reject a template (admin only);
//!     anonymous submissions are deleted instead of marked.
//! *   **`POST /templates/create`** — multipart upload (`keyWords`, `pic`,
//!     optional `notForPublic`); returns the new id as text.
//! *   **`GET /templates/download/{id}?isPreview=`** — the stored asset,
//!     or a width-bounded PNG preview.
//! *   **`GET /templates/{id}`** — id and keywords of one template.
//!
//! The literal routes are registered before `/{id}` so they are not
//! swallowed by the path parameter.

mod approve;
mod create;
mod download;
mod get;
mod list;
mod reject;
mod search;
mod unchecked;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/search", get().to(search::process))
        .route("/unchecked", get().to(unchecked::process))
        .route("/approve/{id}", get().to(approve::process))
        .route("/reject/{id}", get().to(reject::process))
        .route("/create", post().to(create::process))
        .route("/download/{id}", get().to(download::process))
        .route("/{id}", get().to(get::process))
}
