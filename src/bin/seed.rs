use sea_orm::EntityTrait;
use uuid::Uuid;

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

    seed_stocks(&pool).await?;
    seed_products(&pool).await?;

    // Variant rows for the seeded attributes.
    let state = AppState { pool, orm };
    for product in Products::find().all(&state.orm).await? {
        let report = variant_service::sync_product(&state, &product).await?;
        println!(
            "Synced {}: created {}, deleted {}",
            product.name, report.created, report.deleted
        );
    }

    println!("Seed completed");
    Ok(())
}

async fn seed_stocks(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let stocks = [
        ("Main Warehouse", "Downtown depot", true),
        ("Overflow Depot", "Out-of-town storage, currently closed", false),
    ];

    for (name, location, is_active) in stocks {
        sqlx::query(
            r#"
            INSERT INTO stocks (id, name, description, location, is_active)
            VALUES ($1, $2, NULL, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(location)
        .bind(is_active)
        .execute(pool)
        .await?;
        println!("Ensured stock {name} (active={is_active})");
    }

    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = [
        ("Classic Tee", "Plain cotton t-shirt", 1900_i64, "S,M,L,XL", "Black,White"),
        ("Zip Hoodie", "Fleece-lined hoodie", 4900, "M,L", "Grey"),
        ("Canvas Tote", "One-size carry bag", 1200, "", ""),
    ];

    for (name, description, price, sizes, colors) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, sizes, colors)
            VALUES ($1, $2, $3, $4, 0, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(sizes)
        .bind(colors)
        .execute(pool)
        .await?;
        println!("Ensured product {name}");
    }

    Ok(())
}
