pub mod health;
pub mod notes;

use actix_web::web;

use crate::config::Config;

pub fn create_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(web::scope("/notes").configure(|cfg| {
            notes::create_routes(cfg, config.enable_bulk_delete)
        }));
}
