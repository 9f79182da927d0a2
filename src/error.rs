use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Config directory not found at {0}. Run 'wardbill init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid item format '{0}'. Expected 'service_id:quantity' (e.g., '12:3')")]
    InvalidItemFormat(String),

    #[error("Invalid quantity '{qty}' for service {service}: {reason}")]
    InvalidQuantity {
        service: String,
        qty: String,
        reason: String,
    },

    #[error("Service {0} not found in the catalog")]
    ServiceNotFound(u64),

    #[error("Service {id} ({name}) is inactive and cannot be charged")]
    ServiceInactive { id: u64, name: String },

    #[error("No items specified. Use --item <service_id>:<quantity> to add charges.")]
    NoItems,

    #[error("Nothing to finalize: no staged charges and no room/accommodation service matches the patient's room rate")]
    NoChargeableItems,

    #[error("Patient {0} is not in the admitted-patients list")]
    PatientNotFound(u64),

    #[error("Staging group '{0}' not found for this patient")]
    GroupNotFound(String),

    #[error("Service {0} is not staged for this patient")]
    NotStaged(u64),

    #[error("Payment amount must be greater than zero")]
    InvalidPaymentAmount,

    #[error("Payment amount cannot exceed outstanding balance of {symbol}{balance:.2}")]
    ExceedsBalance { symbol: String, balance: f64 },

    #[error("Payment date is required")]
    MissingPaymentDate,

    #[error("Reference number is required for check payments")]
    MissingReference,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Billing server rejected the request: {0}")]
    Server(String),

    #[error("Billing server unreachable: {0}")]
    Http(String),

    #[error("Unexpected response from billing server: {0}")]
    BadResponse(String),

    #[error("Statement of account is for patient {got}, expected {expected}; stale response discarded")]
    StaleResponse { expected: u64, got: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
