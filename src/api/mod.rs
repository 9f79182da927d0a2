mod client;
pub mod types;

pub use client::{flatten_errors, normalize_server_error, BillingClient, FieldError};
