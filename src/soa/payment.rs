use chrono::NaiveDate;
use clap::ValueEnum;
use uuid::Uuid;

use crate::api::types::PaymentRequest;
use crate::error::{BillingError, Result};
use crate::soa::SoaView;

/// Half a centavo; payments exactly equal to the balance must pass.
const AMOUNT_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentMethod {
    Cash,
    Check,
    Philhealth,
    Dswd,
    Hmo,
    Others,
}

impl PaymentMethod {
    /// Wire value the billing server expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Philhealth => "philhealth",
            PaymentMethod::Dswd => "dswd",
            PaymentMethod::Hmo => "hmo",
            PaymentMethod::Others => "others",
        }
    }

    fn reference_prefix(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CSH",
            PaymentMethod::Check => "CHK",
            PaymentMethod::Philhealth => "PHC",
            PaymentMethod::Dswd => "DSW",
            PaymentMethod::Hmo => "HMO",
            PaymentMethod::Others => "OTH",
        }
    }
}

/// Suggested reference number: method prefix + date + random suffix. Only a
/// suggestion — whatever the user passes on the command line wins, and the
/// server never overwrites it.
pub fn suggest_reference(method: PaymentMethod, date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    format!(
        "{}-{}-{}",
        method.reference_prefix(),
        date.format("%Y%m%d"),
        suffix
    )
}

/// Validate a payment against the reconciled view, in order, stopping at the
/// first failure: positive amount, amount within the unfloored balance, date
/// present, reference present for checks.
pub fn validate_payment(
    view: &SoaView,
    amount: f64,
    method: PaymentMethod,
    date: Option<NaiveDate>,
    reference: Option<&str>,
    currency_symbol: &str,
) -> Result<()> {
    if amount <= 0.0 {
        return Err(BillingError::InvalidPaymentAmount);
    }
    if amount > view.outstanding_unfloored + AMOUNT_TOLERANCE {
        return Err(BillingError::ExceedsBalance {
            symbol: currency_symbol.to_string(),
            balance: view.outstanding_unfloored,
        });
    }
    if date.is_none() {
        return Err(BillingError::MissingPaymentDate);
    }
    if method == PaymentMethod::Check && reference.map_or(true, |r| r.trim().is_empty()) {
        return Err(BillingError::MissingReference);
    }
    Ok(())
}

/// Assemble the validated request in the server's wire shape.
pub fn build_payment_request(
    view: &SoaView,
    amount: f64,
    method: PaymentMethod,
    date: NaiveDate,
    reference: Option<String>,
    notes: Option<String>,
) -> PaymentRequest {
    PaymentRequest {
        patient_id: view.patient_id,
        bill_id: view.bill_id,
        amount,
        payment_method: method.as_str().to_string(),
        payment_date: date.format("%Y-%m-%d").to_string(),
        reference_number: Some(reference.unwrap_or_else(|| suggest_reference(method, date))),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(balance: f64) -> SoaView {
        SoaView {
            patient_id: 7,
            bill_id: Some(3),
            lines: Vec::new(),
            payments: Vec::new(),
            current_charges: balance.max(0.0),
            current_payments: 0.0,
            outstanding_balance: balance.max(0.0),
            outstanding_unfloored: balance,
        }
    }

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, 1)
    }

    #[test]
    fn amount_equal_to_balance_is_accepted() {
        let v = view(1000.0);
        assert!(validate_payment(&v, 1000.0, PaymentMethod::Cash, date(), None, "₱").is_ok());
    }

    #[test]
    fn amount_a_centavo_over_is_rejected() {
        let v = view(1000.0);
        let err =
            validate_payment(&v, 1000.01, PaymentMethod::Cash, date(), None, "₱").unwrap_err();
        assert!(matches!(err, BillingError::ExceedsBalance { .. }));
        assert!(err
            .to_string()
            .contains("cannot exceed outstanding balance of ₱1000.00"));
    }

    #[test]
    fn overpayment_rejected_even_when_display_balance_is_zero() {
        // Display floors at 0 but validation uses the unfloored value.
        let v = view(-50.0);
        let err = validate_payment(&v, 10.0, PaymentMethod::Cash, date(), None, "₱").unwrap_err();
        assert!(matches!(err, BillingError::ExceedsBalance { .. }));
    }

    #[test]
    fn non_positive_amount_fails_first() {
        let v = view(-50.0);
        let err = validate_payment(&v, 0.0, PaymentMethod::Cash, None, None, "₱").unwrap_err();
        assert!(matches!(err, BillingError::InvalidPaymentAmount));
    }

    #[test]
    fn missing_date_fails_before_reference_check() {
        let v = view(1000.0);
        let err = validate_payment(&v, 100.0, PaymentMethod::Check, None, None, "₱").unwrap_err();
        assert!(matches!(err, BillingError::MissingPaymentDate));
    }

    #[test]
    fn check_without_reference_fails() {
        let v = view(1000.0);
        let err =
            validate_payment(&v, 100.0, PaymentMethod::Check, date(), Some("  "), "₱").unwrap_err();
        assert!(matches!(err, BillingError::MissingReference));

        assert!(
            validate_payment(&v, 100.0, PaymentMethod::Check, date(), Some("CHK-1"), "₱").is_ok()
        );
    }

    #[test]
    fn suggested_reference_has_method_prefix_and_date() {
        let r = suggest_reference(PaymentMethod::Philhealth, date().unwrap());
        assert!(r.starts_with("PHC-20250601-"));
        assert_eq!(r.len(), "PHC-20250601-".len() + 6);
    }

    #[test]
    fn explicit_reference_is_never_overwritten() {
        let req = build_payment_request(
            &view(500.0),
            200.0,
            PaymentMethod::Check,
            date().unwrap(),
            Some("CHK-CUSTOM-01".to_string()),
            None,
        );
        assert_eq!(req.reference_number.as_deref(), Some("CHK-CUSTOM-01"));
        assert_eq!(req.payment_method, "check");
        assert_eq!(req.payment_date, "2025-06-01");
        assert_eq!(req.bill_id, Some(3));
    }
}
