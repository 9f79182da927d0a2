pub mod api;
pub mod charge;
pub mod config;
pub mod error;
pub mod soa;
pub mod store;

pub use error::{BillingError, Result};
