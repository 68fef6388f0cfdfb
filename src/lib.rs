// src/lib.rs

use sea_orm::DatabaseConnection;
use services::stock_service::StockService;

#[derive(Clone)]
pub struct AppState {
    pub stocks: StockService,
    /// Prefix for the `X-{app}-*` alert headers
    pub app_name: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, app_name: impl Into<String>) -> Self {
        Self {
            stocks: StockService::new(db),
            app_name: app_name.into(),
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod revinfo;
    pub mod stock;
    pub mod stock_aud;
}

pub mod services {
    pub mod stock_mapper;
    pub mod stock_service;
}

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
