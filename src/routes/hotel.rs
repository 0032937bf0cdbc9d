use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Client};
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::hotel::Hotel;

#[derive(serde::Deserialize)]
pub struct CatalogQuery {
    limit: Option<u16>,
    search: Option<String>,
    sort: Option<String>,
}

pub async fn get_hotels(
    data: web::Data<Arc<Client>>,
    params: web::Query<CatalogQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Hotel> = client.database(DB_NAME).collection("hotels");

    let mut options = FindOptions::default();
    if let Some(limit) = params.limit {
        options.limit = Some(limit.into());
    }
    // Same sort modes the explore screen offers
    options.sort = match params.sort.as_deref() {
        Some("price-low") => Some(doc! { "price": 1 }),
        Some("price-high") => Some(doc! { "price": -1 }),
        Some("rating") => Some(doc! { "rating": -1 }),
        _ => None,
    };

    let filter = match &params.search {
        Some(search_text) if !search_text.is_empty() => {
            let prefix = format!("^{}", regex::escape(search_text));
            doc! {
                "$or": [
                    { "name": { "$regex": &prefix, "$options": "i" } },
                    { "location": { "$regex": &prefix, "$options": "i" } },
                ]
            }
        }
        _ => doc! {},
    };

    match collection.find(filter).with_options(options).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Hotel>>().await {
            Ok(hotels) => HttpResponse::Ok().json(hotels),
            Err(err) => {
                eprintln!("Failed to collect documents: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect hotels.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find hotels.")
        }
    }
}

pub async fn get_hotel_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Hotel> = client.database(DB_NAME).collection("hotels");

    let (hotel_id,) = path.into_inner();

    match collection.find_one(doc! { "id": &hotel_id }).await {
        Ok(Some(hotel)) => HttpResponse::Ok().json(hotel),
        Ok(None) => HttpResponse::NotFound().body("Hotel not found"),
        Err(err) => {
            eprintln!("Failed to fetch hotel: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch hotel")
        }
    }
}
