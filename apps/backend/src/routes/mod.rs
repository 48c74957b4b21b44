use actix_web::web;

pub mod games;
pub mod health;

/// Register every route. `main.rs` adds the middleware stack around this;
/// tests call it directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api").configure(games::configure_routes));
}
