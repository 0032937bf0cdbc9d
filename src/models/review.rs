use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Review {
    pub id: String,
    pub user_name: String,
    pub rating: u8, // 1-5 stars
    pub comment: String,
    pub created_at: String, // date only, YYYY-MM-DD
}

#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}
