use actix_web::web;
use crate::handlers::pix_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pix")
            .route("/payload", web::post().to(pix_handlers::create_payload))
            .route("/coupons", web::post().to(pix_handlers::create_coupon_codes))
            .route("/decode", web::post().to(pix_handlers::decode_payload))
    );
}
