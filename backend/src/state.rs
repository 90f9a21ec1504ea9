//! Shared application state, injected into every handler as `web::Data`.

use crate::config::AppConfig;
use crate::media::MediaStore;
use crate::store::Db;

pub struct AppState {
    pub db: Db,
    pub media: MediaStore,
    pub config: AppConfig,
}
