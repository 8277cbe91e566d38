use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::StockVariant;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVariantQuantityRequest {
    pub quantity: i32,
}

/// One entry of the bulk quantity update payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VariantQuantityUpdate {
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct VariantList {
    #[schema(value_type = Vec<StockVariant>)]
    pub items: Vec<StockVariant>,
}

/// Result of one reconciliation pass over a product's variants.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SyncReport {
    pub created: u64,
    pub deleted: u64,
}
