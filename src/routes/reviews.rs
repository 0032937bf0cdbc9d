use actix_web::{web, HttpResponse, Responder};

use crate::models::review::ReviewInput;
use crate::services::review_service::ReviewBoard;

pub async fn list_reviews(
    board: web::Data<ReviewBoard>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let (hotel_id,) = path.into_inner();
    HttpResponse::Ok().json(board.list(&hotel_id))
}

pub async fn add_review(
    board: web::Data<ReviewBoard>,
    path: web::Path<(String,)>,
    input: web::Json<ReviewInput>,
) -> impl Responder {
    let (hotel_id,) = path.into_inner();

    match board.add(&hotel_id, input.into_inner()) {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => HttpResponse::BadRequest().body(err.to_string()),
    }
}
