//! Pipeline module - orchestrates the batch stages

pub mod aggregate;
pub mod clean;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod schema;

pub use aggregate::*;
pub use clean::*;
pub use dataset::*;
pub use error::*;
pub use loader::*;
pub use metrics::*;
pub use schema::*;
