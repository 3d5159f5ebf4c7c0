use actix_web::{App, HttpServer, HttpResponse, web};
use actix_cors::Cors;
use dotenv::dotenv;
use log::{info, warn};

use pix_payload::config::{MerchantProfile, ServerConfig};
use pix_payload::routes;
use pix_payload::services::CouponService;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let server_config = ServerConfig::from_env()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(server_config.log_level.as_str()));

    let coupon_service = web::Data::new(CouponService::new(MerchantProfile::load()?));

    let profile = coupon_service.profile();
    if profile.pix_key().is_none() {
        warn!("No Pix key configured - coupon codes will be unavailable");
    } else {
        info!("Pix payee: {} / {}", profile.payee_name(), profile.payee_city());
    }

    let ServerConfig { host, port, .. } = server_config;
    info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(coupon_service.clone())
            .configure(routes::configure)
            .route("/health", web::get().to(|| async {
                info!("Health check");
                HttpResponse::Ok().body("OK")
            }))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
