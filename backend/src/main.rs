mod auth;
mod config;
mod error;
mod media;
mod search;
mod services;
mod state;
mod store;
mod visibility;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

use crate::config::AppConfig;
use crate::media::MediaStore;
use crate::state::AppState;
use crate::store::Db;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);

    let db = Db::open(&config.database_path)
        .map_err(|e| std::io::Error::other(format!("failed to open database: {e}")))?;
    let media = MediaStore::new(&config.media_root);

    let app_state = web::Data::new(AppState { db, media, config });

    info!("server running at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .service(services::templates::configure_routes())
            .service(services::users::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
