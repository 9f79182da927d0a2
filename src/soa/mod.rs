pub mod dates;
mod payment;
mod reconcile;

pub use payment::{build_payment_request, suggest_reference, validate_payment, PaymentMethod};
pub use reconcile::{build_view, SoaLine, SoaView};
