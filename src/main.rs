use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use staybook_api::db;
use staybook_api::middleware::auth::JwtAuth;
use staybook_api::routes;
use staybook_api::services::reservation_service::ReservationService;
use staybook_api::services::review_service::ReviewBoard;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    let reservations = web::Data::new(ReservationService::new(client.clone()));
    let reviews = web::Data::new(ReviewBoard::new());

    println!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(client.clone()))
            .app_data(reservations.clone())
            .app_data(reviews.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::signup))
                            .route("/signin", web::post().to(routes::account::signin))
                            .service(
                                web::scope("").wrap(JwtAuth).route(
                                    "/session",
                                    web::get().to(routes::account::user_session),
                                ),
                            ),
                    )
                    .service(
                        web::scope("/hotels")
                            .route("", web::get().to(routes::hotel::get_hotels))
                            .route("/{id}", web::get().to(routes::hotel::get_hotel_by_id))
                            .route("/{id}/reviews", web::get().to(routes::reviews::list_reviews))
                            .route("/{id}/reviews", web::post().to(routes::reviews::add_review)),
                    )
                    .route("/weather", web::get().to(routes::weather::get_weather))
                    .route("/deals", web::get().to(routes::deals::get_deals))
                    .service(
                        web::scope("/account/{id}")
                            .wrap(JwtAuth)
                            .route("", web::get().to(routes::account::get_profile))
                            .route("", web::put().to(routes::account::update_profile))
                            .route("/bookings", web::get().to(routes::account::get_bookings))
                            .route("/bookings", web::post().to(routes::account::create_booking))
                            .route(
                                "/bookings/{index}",
                                web::delete().to(routes::account::cancel_booking),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
