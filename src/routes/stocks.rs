use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::stocks::{CreateStockRequest, StockList, UpdateStockRequest},
    error::AppResult,
    models::Stock,
    response::ApiResponse,
    routes::params::StockListQuery,
    services::stock_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(list_stocks))
        .route("/", axum::routing::post(create_stock))
        .route("/{id}", axum::routing::put(update_stock))
}

#[utoipa::path(
    get,
    path = "/api/stocks",
    params(
        ("active" = Option<bool>, Query, description = "Filter by active flag"),
    ),
    responses(
        (status = 200, description = "List stock locations", body = ApiResponse<StockList>)
    ),
    tag = "Stocks"
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<StockListQuery>,
) -> AppResult<Json<ApiResponse<StockList>>> {
    let resp = stock_service::list_stocks(&state, query.active).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stocks",
    request_body = CreateStockRequest,
    responses(
        (status = 200, description = "Create stock location", body = ApiResponse<Stock>)
    ),
    tag = "Stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockRequest>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = stock_service::create_stock(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/stocks/{id}",
    params(
        ("id" = Uuid, Path, description = "Stock ID")
    ),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Updated stock location", body = ApiResponse<Stock>),
        (status = 404, description = "Stock not found"),
    ),
    tag = "Stocks"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = stock_service::update_stock(&state, id, payload).await?;
    Ok(Json(resp))
}
