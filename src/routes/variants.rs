use axum::{
    Json, Router,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    dto::variants::{UpdateVariantQuantityRequest, VariantList, VariantQuantityUpdate},
    error::AppResult,
    models::StockVariant,
    response::ApiResponse,
    services::variant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::put(bulk_update_variants))
        .route("/{id}", axum::routing::put(update_variant))
        .route("/{id}", axum::routing::delete(delete_variant))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/variants",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "List a product's stock variants", body = ApiResponse<VariantList>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Variants"
)]
pub async fn list_product_variants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VariantList>>> {
    let resp = variant_service::list_variants(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/variants/{id}",
    params(
        ("id" = Uuid, Path, description = "Variant ID")
    ),
    request_body = UpdateVariantQuantityRequest,
    responses(
        (status = 200, description = "Set variant quantity; product aggregate recomputed", body = ApiResponse<StockVariant>),
        (status = 404, description = "Variant not found"),
    ),
    tag = "Variants"
)]
pub async fn update_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVariantQuantityRequest>,
) -> AppResult<Json<ApiResponse<StockVariant>>> {
    let resp = variant_service::update_variant_quantity(&state, id, payload.quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/variants",
    request_body = Vec<VariantQuantityUpdate>,
    responses(
        (status = 200, description = "Bulk quantity update, all-or-nothing"),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "Variants"
)]
pub async fn bulk_update_variants(
    State(state): State<AppState>,
    Json(payload): Json<Vec<VariantQuantityUpdate>>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = variant_service::bulk_update_quantities(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/variants/{id}",
    params(
        ("id" = Uuid, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "Deleted variant; product aggregate recomputed"),
        (status = 404, description = "Variant not found"),
    ),
    tag = "Variants"
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = variant_service::delete_variant(&state, id).await?;
    Ok(Json(resp))
}
