use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::Claims;
use crate::models::account::{ProfileResponse, ProfileUpdate, User};

pub async fn get_profile(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String,)>,
    claims: Claims,
) -> impl Responder {
    if path.into_inner().0 != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("users");

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    match collection.find_one(doc! { "_id": user_id }).await {
        Ok(Some(user)) => HttpResponse::Ok().json(ProfileResponse {
            id: user_id,
            email: user.email,
            display_name: user.display_name.unwrap_or_default(),
            bookings: user.bookings,
            created_at: user.created_at,
        }),
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Failed to fetch profile: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch profile")
        }
    }
}

pub async fn update_profile(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String,)>,
    claims: Claims,
    input: web::Json<ProfileUpdate>,
) -> impl Responder {
    if path.into_inner().0 != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("users");

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let update = doc! {
        "$set": {
            "display_name": &input.display_name,
            "updated_at": Utc::now().to_rfc3339(),
        }
    };

    match collection.update_one(doc! { "_id": user_id }, update).await {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("User not found");
            }
            HttpResponse::Ok().body("User information updated")
        }
        Err(err) => {
            eprintln!("Failed to update profile: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update user information")
        }
    }
}
