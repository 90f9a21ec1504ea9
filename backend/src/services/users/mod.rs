//! # User endpoints
//!
//! Everything under `/user`: account registration and login (both answer
//! with a signed bearer token as a text body), the caller's favorites, and
//! the caller's own uploads.
//!
//! ## Registered routes
//!
//! *   **`GET /user/register?login=&password=`** — create an account;
//!     409 when the login is taken.
//! *   **`GET /user/login?login=&password=`** — 404 when no user matches
//!     the credentials.
//! *   **`GET /user/favs`** — favorite template ids (authenticated).
//! *   **`GET /user/favs/add?template=`** — add a favorite; a repeat add is
//!     a plain success.
//! *   **`GET /user/favs/remove?template=`** — remove a favorite; removing
//!     one that is not there is a 409.
//! *   **`GET /user/uploads`** — ids of the caller's own submissions, any
//!     state.

mod favorites;
mod login;
mod register;
mod uploads;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/user";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/register", get().to(register::process))
        .route("/login", get().to(login::process))
        .route("/favs", get().to(favorites::list))
        .route("/favs/add", get().to(favorites::add))
        .route("/favs/remove", get().to(favorites::remove))
        .route("/uploads", get().to(uploads::process))
}
