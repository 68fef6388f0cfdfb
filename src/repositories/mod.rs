pub mod stock_repository;
pub mod stock_audit_repository;
