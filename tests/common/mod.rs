use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::options::ClientOptions;

use staybook_api::middleware::auth::{Claims, JwtAuth};
use staybook_api::routes;
use staybook_api::services::reservation_service::ReservationService;
use staybook_api::services::review_service::ReviewBoard;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    /// Builds the real route tree over a lazily connecting client with
    /// short timeouts. The paths these tests assert on never reach
    /// storage, so no database has to be running.
    pub async fn new() -> Self {
        std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);

        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let mut options = ClientOptions::parse(&mongo_uri)
            .await
            .expect("invalid test MongoDB URI");
        options.connect_timeout = Some(Duration::from_secs(1));
        options.server_selection_timeout = Some(Duration::from_secs(1));

        let client =
            mongodb::Client::with_options(options).expect("failed to build test client");

        Self {
            client: Arc::new(client),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.client.clone()))
            .app_data(web::Data::new(ReservationService::new(self.client.clone())))
            .app_data(web::Data::new(ReviewBoard::new()))
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
    }
}

/// Signs a token the auth middleware will accept once `TestApp::new` has
/// pinned the secret.
#[allow(dead_code)]
pub fn bearer_token(user_id: &str, email: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        user_id: user_id.to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token");

    format!("Bearer {}", token)
}
