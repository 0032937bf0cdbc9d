use actix_web::{web, HttpResponse, Responder};

use crate::middleware::auth::Claims;
use crate::models::bookings::BookingRequest;
use crate::services::reservation_service::{AccountContext, BookingError, ReservationService};

pub async fn create_booking(
    service: web::Data<ReservationService>,
    input: web::Json<BookingRequest>,
    path: web::Path<(String,)>,
    claims: Claims,
) -> impl Responder {
    if path.into_inner().0 != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let account = match AccountContext::from_claims(&claims) {
        Ok(account) => account,
        Err(err) => return error_response(err),
    };

    match service.create_booking(&account, input.into_inner()).await {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(err) => error_response(err),
    }
}

pub async fn cancel_booking(
    service: web::Data<ReservationService>,
    path: web::Path<(String, usize)>,
    claims: Claims,
) -> impl Responder {
    let (user_id, index) = path.into_inner();
    if user_id != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let account = match AccountContext::from_claims(&claims) {
        Ok(account) => account,
        Err(err) => return error_response(err),
    };

    match service.cancel_booking(&account, index).await {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Booking cancelled successfully",
            "hotel_name": removed.hotel_name,
        })),
        Err(err) => error_response(err),
    }
}

pub async fn get_bookings(
    service: web::Data<ReservationService>,
    path: web::Path<(String,)>,
    claims: Claims,
) -> impl Responder {
    if path.into_inner().0 != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let account = match AccountContext::from_claims(&claims) {
        Ok(account) => account,
        Err(err) => return error_response(err),
    };

    match service.list_bookings(&account).await {
        Ok(mut bookings) => {
            // Stored order is insertion order; the app shows newest first.
            bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            HttpResponse::Ok().json(bookings)
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: BookingError) -> HttpResponse {
    let message = err.to_string();
    match err {
        BookingError::Unauthenticated => HttpResponse::Unauthorized().body(message),
        BookingError::InvalidQuantity(_) | BookingError::InvalidRange => {
            HttpResponse::BadRequest().body(message)
        }
        BookingError::IndexOutOfRange | BookingError::AccountNotFound => {
            HttpResponse::NotFound().body(message)
        }
        BookingError::NotCancellable => HttpResponse::Conflict().body(message),
        BookingError::Persistence(detail) => {
            eprintln!("Storage error: {}", detail);
            HttpResponse::InternalServerError().body("Failed to save booking")
        }
    }
}
