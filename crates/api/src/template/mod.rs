mod create_template;

use actix_web::web;
use create_template::create_template_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/org/{organization_id}/templates",
        web::post().to(create_template_controller),
    );
}
