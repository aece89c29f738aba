mod create_event;
mod delete_event;
mod get_event;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
use get_event::get_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/org/{organization_id}/events",
        web::post().to(create_event_controller),
    );
    cfg.route(
        "/org/{organization_id}/events/{event_id}",
        web::get().to(get_event_controller),
    );
    cfg.route(
        "/org/{organization_id}/events/{event_id}",
        web::delete().to(delete_event_controller),
    );
}
