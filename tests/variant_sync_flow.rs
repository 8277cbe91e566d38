use std::collections::BTreeSet;

use axum_stock_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::{
        stock_variants::{
            ActiveModel as VariantActive, Column as VariantCol, Entity as StockVariants,
        },
        stocks::{ActiveModel as StockActive, Model as StockModel},
    },
    error::AppError,
    services::{product_service, variant_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Statement};
use uuid::Uuid;

// Full reconciliation lifecycle: create -> idempotent resync -> quantity ->
// attribute change -> empty attributes, including the inactive-stock asymmetry.
#[tokio::test]
async fn variant_reconciliation_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let warehouse_a = create_stock(&state, "Warehouse A", true).await?;
    let warehouse_b = create_stock(&state, "Warehouse B", false).await?;

    // Creating a product generates variants in the active stock only.
    let created = product_service::create_product(
        &state,
        CreateProductRequest {
            name: "Test Shirt".into(),
            description: "A shirt for testing".into(),
            price: 1500,
            sizes: " s, m ,".into(),
            colors: "Red".into(),
        },
    )
    .await?;
    let product = created.data.unwrap();
    assert_eq!(product.stock, 0);

    let names = variant_names_for(&state, product.id).await?;
    assert_eq!(names, set(&["M - RED", "S - RED"]));
    let in_b = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product.id))
        .filter(VariantCol::StockId.eq(warehouse_b.id))
        .all(&state.orm)
        .await?;
    assert!(in_b.is_empty(), "inactive stock must not receive variants");

    // Resync with unchanged attributes is a no-op.
    let product_row = axum_stock_api::entity::products::Entity::find_by_id(product.id)
        .one(&state.orm)
        .await?
        .unwrap();
    let report = variant_service::sync_product(&state, &product_row).await?;
    assert_eq!((report.created, report.deleted), (0, 0));

    // Quantity updates flow into the cached aggregate.
    let s_red = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product.id))
        .filter(VariantCol::VariantName.eq("S - RED"))
        .one(&state.orm)
        .await?
        .unwrap();
    variant_service::update_variant_quantity(&state, s_red.id, 5).await?;
    let fetched = product_service::get_product(&state, product.id).await?;
    assert_eq!(fetched.data.unwrap().stock, 5);

    // Plant rows in the inactive stock: one valid-named, one invalid-named.
    let valid_in_b =
        insert_variant(&state, product.id, warehouse_b.id, "M - RED", 7).await?;
    insert_variant(&state, product.id, warehouse_b.id, "XL - GREEN", 3).await?;

    // Changing sizes reconciles: S goes away everywhere, L appears in the
    // active stock, and the invalid name is purged even from the inactive one.
    let updated = product_service::update_product(
        &state,
        product.id,
        UpdateProductRequest {
            name: None,
            description: None,
            price: None,
            sizes: Some("M,L".into()),
            colors: None,
        },
    )
    .await?;
    let updated = updated.data.unwrap();

    let rows = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product.id))
        .all(&state.orm)
        .await?;
    let names: BTreeSet<String> = rows.iter().map(|v| v.variant_name.clone()).collect();
    assert_eq!(names, set(&["L - RED", "M - RED"]));
    assert!(
        rows.iter()
            .any(|v| v.stock_id == warehouse_a.id && v.variant_name == "L - RED" && v.quantity == 0),
        "new variant starts at quantity 0"
    );
    let survivor = rows.iter().find(|v| v.id == valid_in_b).unwrap();
    assert_eq!(
        survivor.quantity, 7,
        "valid-named variant in an inactive stock stays untouched"
    );

    // Aggregate sums all variants, inactive stocks included.
    assert_eq!(updated.stock, 7);

    // Clearing one dimension removes every variant.
    let cleared = product_service::update_product(
        &state,
        product.id,
        UpdateProductRequest {
            name: None,
            description: None,
            price: None,
            sizes: None,
            colors: Some("".into()),
        },
    )
    .await?;
    assert_eq!(cleared.data.unwrap().stock, 0);
    let remaining = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product.id))
        .all(&state.orm)
        .await?;
    assert!(remaining.is_empty());

    Ok(())
}

#[tokio::test]
async fn variant_quantity_errors() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    // No truncate here: this test only touches ids that cannot exist, and the
    // flow test above may be running against the same database in parallel.
    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let state = AppState { pool, orm };

    let err = variant_service::update_variant_quantity(&state, Uuid::new_v4(), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = variant_service::update_variant_quantity(&state, Uuid::new_v4(), -1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = variant_service::bulk_update_quantities(&state, Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE stock_variants, products, stocks, audit_logs RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_stock(
    state: &AppState,
    name: &str,
    is_active: bool,
) -> anyhow::Result<StockModel> {
    let stock = StockActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(None),
        location: Set("Test Street 1".into()),
        is_active: Set(is_active),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(stock)
}

async fn insert_variant(
    state: &AppState,
    product_id: Uuid,
    stock_id: Uuid,
    name: &str,
    quantity: i32,
) -> anyhow::Result<Uuid> {
    let variant = VariantActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        stock_id: Set(stock_id),
        variant_name: Set(name.to_string()),
        quantity: Set(quantity),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(variant.id)
}

async fn variant_names_for(state: &AppState, product_id: Uuid) -> anyhow::Result<BTreeSet<String>> {
    let names = StockVariants::find()
        .filter(VariantCol::ProductId.eq(product_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|v| v.variant_name)
        .collect();
    Ok(names)
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
