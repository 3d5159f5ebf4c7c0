mod pix_routes;

pub use pix_routes::configure as configure_pix_routes;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    configure_pix_routes(cfg);
}
