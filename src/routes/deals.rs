use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use std::env;

use crate::models::hotel::Deal;

const DEFAULT_FEED_URL: &str = "https://fakestoreapi.com/products?limit=10";

#[derive(Debug, Deserialize)]
struct FeedProduct {
    id: u32,
    title: String,
    price: f64,
    description: String,
    category: String,
    image: String,
    rating: FeedRating,
}

#[derive(Debug, Deserialize)]
struct FeedRating {
    rate: f32,
    count: u32,
}

pub async fn get_deals() -> impl Responder {
    let url = env::var("DEALS_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

    let response = match reqwest::get(&url).await {
        Ok(response) => response,
        Err(err) => {
            eprintln!("Failed to fetch deals feed: {:?}", err);
            return HttpResponse::BadGateway().body("Failed to fetch deals");
        }
    };

    if !response.status().is_success() {
        eprintln!("Deals feed returned status {}", response.status());
        return HttpResponse::BadGateway().body("Failed to fetch deals");
    }

    match response.json::<Vec<FeedProduct>>().await {
        Ok(products) => {
            let deals: Vec<Deal> = products.into_iter().map(into_deal).collect();
            HttpResponse::Ok().json(deals)
        }
        Err(err) => {
            eprintln!("Failed to parse deals feed: {:?}", err);
            HttpResponse::BadGateway().body("Failed to parse deals")
        }
    }
}

/// Feed products double as half-price hotel deals, the same transform the
/// mobile app applies to the demo store feed.
fn into_deal(item: FeedProduct) -> Deal {
    let title: String = item.title.chars().take(30).collect();

    Deal {
        id: format!("deal-{}", item.id),
        name: format!("{}... Hotel", title),
        description: item.description,
        original_price: (item.price * 100.0).round() as i64,
        discounted_price: (item.price * 50.0).round() as i64,
        discount: "50%".to_string(),
        rating: item.rating.rate,
        image: item.image,
        category: item.category,
        review_count: item.rating.count,
        amenities: vec![
            "Free WiFi".to_string(),
            "Pool".to_string(),
            "Breakfast Included".to_string(),
        ],
    }
}
