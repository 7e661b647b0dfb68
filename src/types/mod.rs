//! Type definitions

pub mod customer;
pub mod route;

pub use customer::*;
pub use route::*;
