//! Completed-task aggregation and project export.
//!
//! External APIs are only reached through the traits in [`source`]; the concrete
//! HTTP client lives in `taskexport-plugins`.

pub mod api;
pub mod completed;
pub mod config;
pub mod error;
pub mod executor;
pub mod export;
pub mod paginate;
pub mod source;
pub mod types;
