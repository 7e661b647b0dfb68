//! Pool Routes - daily route planning for pool-service crews
//!
//! Keeps one route per technician, orders stops with a grouped
//! nearest-neighbor + 2-opt heuristic and reports the miles, minutes and fuel
//! saved against the as-added order.

pub mod cli;
pub mod config;
pub mod db;
pub mod defaults;
pub mod handlers;
pub mod services;
pub mod types;
