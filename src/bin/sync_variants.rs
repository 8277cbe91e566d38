//! Bulk reconciliation command: walk every product and bring its stock-variant
//! rows in line with its declared sizes and colors. Safe to re-run; a second
//! pass with nothing changed reports zero creates and deletes. Operators run
//! this manually after batch imports or a partially failed run.

use sea_orm::EntityTrait;

use axum_stock_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    entity::products::Entity as Products,
    services::variant_service,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let state = AppState { pool, orm };

    let products = Products::find().all(&state.orm).await?;
    let mut total_created = 0u64;
    let mut total_deleted = 0u64;

    for product in &products {
        let report = variant_service::sync_product(&state, product).await?;
        if report.created > 0 || report.deleted > 0 {
            println!(
                "{}: created {}, deleted {}",
                product.name, report.created, report.deleted
            );
        }
        total_created += report.created;
        total_deleted += report.deleted;
    }

    println!(
        "Sync complete: {} products, {} variants created, {} deleted",
        products.len(),
        total_created,
        total_deleted
    );
    Ok(())
}
