use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Stock;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStockRequest {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct StockList {
    #[schema(value_type = Vec<Stock>)]
    pub items: Vec<Stock>,
}
