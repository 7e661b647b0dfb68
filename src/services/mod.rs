//! Business logic services

pub mod export;
pub mod geo;
pub mod geocoding;
pub mod optimizer;
pub mod route_store;
pub mod savings;
