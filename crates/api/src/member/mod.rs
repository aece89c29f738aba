mod create_group;
mod create_member;
mod get_members;

use actix_web::web;
use create_group::create_group_controller;
use create_member::create_member_controller;
use get_members::get_members_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/org/{organization_id}/members",
        web::post().to(create_member_controller),
    );
    cfg.route(
        "/org/{organization_id}/members",
        web::get().to(get_members_controller),
    );
    cfg.route(
        "/org/{organization_id}/groups",
        web::post().to(create_group_controller),
    );
}
