pub mod products;
pub mod stock_variants;
pub mod stocks;
