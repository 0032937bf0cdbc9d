use serde::{Deserialize, Serialize};

/// Catalog entry. Read-only reference data; bookings copy the fields they
/// need instead of holding a reference to this record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: i64, // nightly rate, whole currency units
    pub rating: f32,
    pub image: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Discounted listing built from the external deals feed.
#[derive(Debug, Serialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub description: String,
    pub original_price: i64,
    pub discounted_price: i64,
    pub discount: String,
    pub rating: f32,
    pub image: String,
    pub category: String,
    pub review_count: u32,
    pub amenities: Vec<String>,
}
