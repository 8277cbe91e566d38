pub mod products;
pub mod stocks;
pub mod variants;
