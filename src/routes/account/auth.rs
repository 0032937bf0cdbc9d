use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::WriteError;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::Claims;
use crate::models::account::{Credentials, SignupInput, User, UserSession};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

pub async fn signup(data: web::Data<Arc<Client>>, input: web::Json<SignupInput>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("users");

    let input = input.into_inner();
    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().body("Invalid email address");
    }

    let hashed = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(err) => {
            eprintln!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create user");
        }
    };

    let curr_time = Utc::now();

    // The profile document owns the booking list; creating it here with an
    // empty list is what makes the account bookable at all.
    let user = User {
        id: None,
        email: input.email,
        password: hashed,
        display_name: input.display_name,
        bookings: Vec::new(),
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&user).await {
        Ok(result) => match result.inserted_id.as_object_id() {
            Some(id) => match generate_token(&user.email, id) {
                Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
            },
            None => HttpResponse::InternalServerError().body("Failed to create user"),
        },
        Err(err) => {
            let duplicate = matches!(
                *err.kind,
                mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
                    WriteError { code: 11000, .. }
                ))
            );
            if duplicate {
                HttpResponse::Conflict().body("User already exists")
            } else {
                eprintln!("Failed to create user: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to create user")
            }
        }
    }
}

pub async fn signin(data: web::Data<Arc<Client>>, input: web::Json<Credentials>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("users");

    let creds = input.into_inner();

    match collection.find_one(doc! { "email": &creds.email }).await {
        Ok(Some(user)) => {
            if !bcrypt::verify(&creds.password, &user.password).unwrap_or(false) {
                return HttpResponse::Unauthorized().body("Invalid credentials");
            }

            let user_id = match user.id {
                Some(id) => id,
                None => {
                    eprintln!("User record for {} has no id", user.email);
                    return HttpResponse::InternalServerError().body("Failed to sign in.");
                }
            };

            match generate_token(&user.email, user_id) {
                Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
            }
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Database error: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to process signin")
        }
    }
}

pub async fn user_session(claims: Claims, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DB_NAME).collection("users");

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    match collection.find_one(doc! { "_id": user_id }).await {
        Ok(Some(user)) => {
            let session = UserSession {
                id: user_id,
                email: user.email,
                display_name: user.display_name.unwrap_or_default(),
                created_at: user.created_at.unwrap_or_else(Utc::now),
            };
            HttpResponse::Ok().json(session)
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch user")
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    match regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    ) {
        Ok(re) => re.is_match(email),
        Err(_) => false,
    }
}

pub fn generate_token(email: &str, user_id: ObjectId) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_string(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}
