mod create_organization;
mod get_organization;
mod set_organization_sms;

use actix_web::web;
use create_organization::create_organization_controller;
use get_organization::get_organization_controller;
use set_organization_sms::set_organization_sms_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/org", web::post().to(create_organization_controller));
    cfg.route(
        "/org/{organization_id}",
        web::get().to(get_organization_controller),
    );
    cfg.route(
        "/org/{organization_id}/sms",
        web::put().to(set_organization_sms_controller),
    );
}
