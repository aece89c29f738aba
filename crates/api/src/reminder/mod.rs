mod recipients;
pub mod send_event_reminders;

use actix_web::web;
use send_event_reminders::run_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/run", web::post().to(run_reminders_controller));
}
