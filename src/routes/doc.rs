use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        stocks::{CreateStockRequest, StockList, UpdateStockRequest},
        variants::{SyncReport, UpdateVariantQuantityRequest, VariantList, VariantQuantityUpdate},
    },
    models::{Product, Stock, StockVariant},
    response::{ApiResponse, Meta},
    routes::{health, params, products, stocks, variants},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        variants::list_product_variants,
        variants::update_variant,
        variants::bulk_update_variants,
        variants::delete_variant,
        stocks::list_stocks,
        stocks::create_stock,
        stocks::update_stock,
    ),
    components(
        schemas(
            Product,
            Stock,
            StockVariant,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateStockRequest,
            UpdateStockRequest,
            StockList,
            UpdateVariantQuantityRequest,
            VariantQuantityUpdate,
            VariantList,
            SyncReport,
            params::Pagination,
            params::ProductQuery,
            params::StockListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Stock>,
            ApiResponse<StockList>,
            ApiResponse<StockVariant>,
            ApiResponse<VariantList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Stocks", description = "Stock location endpoints"),
        (name = "Variants", description = "Stock variant endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
