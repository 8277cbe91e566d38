use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::stocks::{ActiveModel, Column, Entity as Stocks, Model as StockModel},
    error::{AppError, AppResult},
    models::Stock,
    response::{ApiResponse, Meta},
    state::AppState,
};
use crate::dto::stocks::{CreateStockRequest, StockList, UpdateStockRequest};

/// The stock locations that participate in variant creation. Inactive stocks
/// are excluded here, which is the only place reconciliation filters on them.
pub async fn list_active_stocks<C>(conn: &C) -> AppResult<Vec<StockModel>>
where
    C: ConnectionTrait,
{
    let stocks = Stocks::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Name)
        .all(conn)
        .await?;
    Ok(stocks)
}

pub async fn list_stocks(
    state: &AppState,
    active: Option<bool>,
) -> AppResult<ApiResponse<StockList>> {
    let mut finder = Stocks::find().order_by_asc(Column::Name);
    if let Some(active) = active {
        finder = finder.filter(Column::IsActive.eq(active));
    }

    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(stock_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Stocks",
        StockList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_stock(
    state: &AppState,
    payload: CreateStockRequest,
) -> AppResult<ApiResponse<Stock>> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        location: Set(payload.location),
        is_active: Set(payload.is_active),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let stock = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "stock_create",
        Some("stocks"),
        Some(serde_json::json!({ "stock_id": stock.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Stock created",
        stock_from_entity(stock),
        Some(Meta::empty()),
    ))
}

/// Deactivating a stock does not touch its existing variants; they simply stop
/// receiving new ones on future reconciliations.
pub async fn update_stock(
    state: &AppState,
    id: Uuid,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<Stock>> {
    let existing = Stocks::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let stock = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "stock_update",
        Some("stocks"),
        Some(serde_json::json!({ "stock_id": stock.id, "is_active": stock.is_active })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        stock_from_entity(stock),
        Some(Meta::empty()),
    ))
}

fn stock_from_entity(model: StockModel) -> Stock {
    Stock {
        id: model.id,
        name: model.name,
        description: model.description,
        location: model.location,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
