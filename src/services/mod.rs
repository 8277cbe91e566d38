pub mod product_service;
pub mod stock_service;
pub mod variant_service;
