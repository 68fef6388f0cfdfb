pub mod headers;
pub mod stock;
