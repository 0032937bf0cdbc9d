use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::models::review::{Review, ReviewInput};

#[derive(Debug)]
pub enum ReviewError {
    InvalidInput(&'static str),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::InvalidInput(reason) => write!(f, "Invalid review: {}", reason),
        }
    }
}

impl std::error::Error for ReviewError {}

/// In-memory review collections, one list per hotel, newest first. Reviews
/// live for the lifetime of the process; each hotel's list starts from the
/// same seeded pair the mobile app ships with. There is no edit or delete.
pub struct ReviewBoard {
    reviews: RwLock<HashMap<String, Vec<Review>>>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(HashMap::new()),
        }
    }

    /// Current reviews for a hotel, newest first. Reading does not change
    /// the list beyond seeding it on first touch.
    pub fn list(&self, hotel_id: &str) -> Vec<Review> {
        let mut all = self.reviews.write().expect("review store lock poisoned");
        all.entry(hotel_id.to_string())
            .or_insert_with(seed_reviews)
            .clone()
    }

    /// Prepends a new review so the newest entry is always first.
    pub fn add(&self, hotel_id: &str, input: ReviewInput) -> Result<Review, ReviewError> {
        if input.rating < 1 || input.rating > 5 {
            return Err(ReviewError::InvalidInput("rating must be between 1 and 5"));
        }
        let comment = input.comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::InvalidInput("comment cannot be empty"));
        }

        let now = Utc::now();
        let review = Review {
            id: now.timestamp_millis().to_string(),
            user_name: input.user_name,
            rating: input.rating,
            comment: comment.to_string(),
            created_at: now.format("%Y-%m-%d").to_string(),
        };

        let mut all = self.reviews.write().expect("review store lock poisoned");
        all.entry(hotel_id.to_string())
            .or_insert_with(seed_reviews)
            .insert(0, review.clone());

        Ok(review)
    }
}

impl Default for ReviewBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".to_string(),
            user_name: "John Smith".to_string(),
            rating: 5,
            comment: "Absolutely amazing experience! The staff was incredibly friendly and the views were breathtaking.".to_string(),
            created_at: "2024-10-15".to_string(),
        },
        Review {
            id: "2".to_string(),
            user_name: "Sarah Johnson".to_string(),
            rating: 4,
            comment: "Great hotel with excellent amenities. The spa was wonderful!".to_string(),
            created_at: "2024-10-10".to_string(),
        },
    ]
}
