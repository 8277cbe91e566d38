use std::collections::{BTreeSet, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::variants::{SyncReport, VariantList, VariantQuantityUpdate},
    entity::{
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
        stock_variants::{
            ActiveModel as VariantActive, Column as VariantCol, Entity as StockVariants,
            Model as VariantModel,
        },
        stocks::Model as StockModel,
    },
    error::{AppError, AppResult},
    models::StockVariant,
    response::{ApiResponse, Meta},
    services::stock_service,
    state::AppState,
    variant_names::{build_variant_names, normalize_tokens},
};

/// Set-equality check over normalized tokens. Callers use this to decide
/// whether a product write actually touched the variant attributes before
/// paying for a reconciliation pass.
pub fn attributes_changed(
    old_sizes: &str,
    old_colors: &str,
    new_sizes: &str,
    new_colors: &str,
) -> bool {
    normalize_tokens(old_sizes) != normalize_tokens(new_sizes)
        || normalize_tokens(old_colors) != normalize_tokens(new_colors)
}

/// Diff the product's variant rows against `valid_names` and apply the result.
///
/// Creates run per active stock only; the delete pass is stock-agnostic, so an
/// invalid-named variant sitting in a deactivated stock still goes away while a
/// valid-named one there is left alone. New rows start at quantity 0; existing
/// rows are never touched. Runs on whatever connection the caller hands in, so
/// the caller owns the transaction boundary.
pub async fn reconcile<C>(
    conn: &C,
    product_id: Uuid,
    valid_names: &BTreeSet<String>,
    active_stocks: &[StockModel],
) -> AppResult<SyncReport>
where
    C: ConnectionTrait,
{
    let existing_rows = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product_id))
        .all(conn)
        .await?;
    let existing: HashSet<(Uuid, &str)> = existing_rows
        .iter()
        .map(|v| (v.stock_id, v.variant_name.as_str()))
        .collect();

    let mut to_create: Vec<VariantActive> = Vec::new();
    for stock in active_stocks {
        for name in valid_names {
            if existing.contains(&(stock.id, name.as_str())) {
                continue;
            }
            to_create.push(VariantActive {
                id: Set(Uuid::new_v4()),
                product_id: Set(product_id),
                stock_id: Set(stock.id),
                variant_name: Set(name.clone()),
                quantity: Set(0),
                created_at: NotSet,
                updated_at: NotSet,
            });
        }
    }

    // The unique index on (product_id, stock_id, variant_name) is the only
    // guard against concurrent reconcilers; a row raced in by someone else
    // counts as "already exists", not a failure.
    let created = if to_create.is_empty() {
        0
    } else {
        StockVariants::insert_many(to_create)
            .on_conflict(
                OnConflict::columns([
                    VariantCol::ProductId,
                    VariantCol::StockId,
                    VariantCol::VariantName,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?
    };

    // With no valid names this matches every row of the product, which is
    // exactly right: an empty size or color list means no variants at all.
    let deleted = StockVariants::delete_many()
        .filter(VariantCol::ProductId.eq(product_id))
        .filter(VariantCol::VariantName.is_not_in(valid_names.iter().cloned()))
        .exec(conn)
        .await?
        .rows_affected;

    Ok(SyncReport { created, deleted })
}

/// Recompute the product's cached aggregate as the sum of quantities over all
/// of its variants, active stocks or not, and persist it.
pub async fn recompute_stock<C>(conn: &C, product_id: Uuid) -> AppResult<i64>
where
    C: ConnectionTrait,
{
    let total = StockVariants::find()
        .select_only()
        .column_as(VariantCol::Quantity.sum(), "total")
        .filter(VariantCol::ProductId.eq(product_id))
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten()
        .unwrap_or(0);

    let result = Products::update_many()
        .col_expr(ProdCol::Stock, Expr::value(total))
        .filter(ProdCol::Id.eq(product_id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(total)
}

/// Canonical reconciliation entry point. Callers pass the normalized size and
/// color sets they intend the product to have; detecting whether anything
/// changed is their job, not ours. One transaction covers the whole pass plus
/// the aggregate recompute, so a failed run leaves no partial state behind.
pub async fn on_product_variant_attributes_changed(
    state: &AppState,
    product: &ProductModel,
    sizes: &BTreeSet<String>,
    colors: &BTreeSet<String>,
) -> AppResult<SyncReport> {
    let valid_names = build_variant_names(sizes, colors);
    let active_stocks = stock_service::list_active_stocks(&state.orm).await?;

    let txn = state.orm.begin().await?;
    let report = reconcile(&txn, product.id, &valid_names, &active_stocks).await?;
    let total = recompute_stock(&txn, product.id).await?;
    txn.commit().await?;

    tracing::info!(
        product_id = %product.id,
        created = report.created,
        deleted = report.deleted,
        total_stock = total,
        "reconciled stock variants"
    );

    if report.created > 0 || report.deleted > 0 {
        if let Err(err) = log_audit(
            &state.pool,
            "variant_sync",
            Some("stock_variants"),
            Some(serde_json::json!({
                "product_id": product.id,
                "created": report.created,
                "deleted": report.deleted,
            })),
        )
        .await
        {
            tracing::warn!(error = %err, "audit log failed");
        }
    }

    Ok(report)
}

/// Reconcile a product from its own stored attribute strings. Used by the
/// create path and the bulk sync command, which treat every product as
/// possibly changed.
pub async fn sync_product(state: &AppState, product: &ProductModel) -> AppResult<SyncReport> {
    let sizes = normalize_tokens(&product.sizes);
    let colors = normalize_tokens(&product.colors);
    on_product_variant_attributes_changed(state, product, &sizes, &colors).await
}

pub async fn list_variants(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<VariantList>> {
    let product = Products::find_by_id(product_id).one(&state.orm).await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let items = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product_id))
        .order_by_asc(VariantCol::StockId)
        .order_by_asc(VariantCol::VariantName)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(variant_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Variants",
        VariantList { items },
        Some(Meta::empty()),
    ))
}

/// The only path that ever sets a non-zero quantity. The reconciler itself has
/// no authority over quantities.
pub async fn update_variant_quantity(
    state: &AppState,
    id: Uuid,
    quantity: i32,
) -> AppResult<ApiResponse<StockVariant>> {
    if quantity < 0 {
        return Err(AppError::BadRequest("Quantity must be >= 0".into()));
    }

    let txn = state.orm.begin().await?;

    let variant = StockVariants::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let variant = match variant {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    let product_id = variant.product_id;

    let mut active: VariantActive = variant.into();
    active.quantity = Set(quantity);
    active.updated_at = Set(Utc::now().into());
    let variant = active.update(&txn).await?;

    let total = recompute_stock(&txn, product_id).await?;
    txn.commit().await?;

    tracing::info!(
        variant_id = %variant.id,
        product_id = %product_id,
        quantity,
        total_stock = total,
        "variant quantity updated"
    );

    if let Err(err) = log_audit(
        &state.pool,
        "variant_quantity_update",
        Some("stock_variants"),
        Some(serde_json::json!({ "variant_id": variant.id, "quantity": quantity })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Variant updated",
        variant_from_entity(variant),
        Some(Meta::empty()),
    ))
}

/// Apply a batch of quantity updates in one transaction; any missing variant
/// or negative quantity aborts the whole batch. Aggregates are recomputed once
/// per product touched.
pub async fn bulk_update_quantities(
    state: &AppState,
    updates: Vec<VariantQuantityUpdate>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if updates.is_empty() {
        return Err(AppError::BadRequest("Expected a non-empty list".into()));
    }
    if updates.iter().any(|u| u.quantity < 0) {
        return Err(AppError::BadRequest("Quantity must be >= 0".into()));
    }

    let txn = state.orm.begin().await?;
    let mut touched_products: BTreeSet<Uuid> = BTreeSet::new();

    for update in &updates {
        let variant = StockVariants::find_by_id(update.id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let variant = match variant {
            Some(v) => v,
            None => return Err(AppError::NotFound),
        };
        touched_products.insert(variant.product_id);

        let mut active: VariantActive = variant.into();
        active.quantity = Set(update.quantity);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;
    }

    for product_id in &touched_products {
        recompute_stock(&txn, *product_id).await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "variant_bulk_quantity_update",
        Some("stock_variants"),
        Some(serde_json::json!({ "updated": updates.len() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Variants updated",
        serde_json::json!({ "updated": updates.len() }),
        Some(Meta::empty()),
    ))
}

pub async fn delete_variant(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let variant = StockVariants::find_by_id(id).one(&txn).await?;
    let variant = match variant {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    let product_id = variant.product_id;

    StockVariants::delete_by_id(id).exec(&txn).await?;
    recompute_stock(&txn, product_id).await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "variant_delete",
        Some("stock_variants"),
        Some(serde_json::json!({ "variant_id": id, "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn variant_from_entity(model: VariantModel) -> StockVariant {
    StockVariant {
        id: model.id,
        product_id: model.product_id,
        stock_id: model.stock_id,
        variant_name: model.variant_name,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::attributes_changed;

    #[test]
    fn unchanged_attributes_are_detected_through_formatting_noise() {
        assert!(!attributes_changed("S,M,L", "Red", " s, m ,L,", "RED "));
    }

    #[test]
    fn added_size_counts_as_changed() {
        assert!(attributes_changed("S,M", "RED", "S,M,L", "RED"));
    }

    #[test]
    fn reordered_tokens_are_not_a_change() {
        assert!(!attributes_changed("M,S", "BLUE,RED", "S,M", "RED,BLUE"));
    }
}
