use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    /// Cached aggregate of all variant quantities; never set directly.
    pub stock: i64,
    /// Comma-separated sizes, e.g. "S,M,L".
    pub sizes: String,
    /// Comma-separated colors, e.g. "Red,Blue".
    pub colors: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Stock {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub stock_id: Uuid,
    pub variant_name: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
