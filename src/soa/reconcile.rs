use chrono::NaiveDate;
use serde_json::Value;

use crate::api::types::{ItemizedCharge, PaymentRecord, SoaResponse, SoaTotals};
use crate::error::{BillingError, Result};
use crate::soa::dates::charge_date;

/// One display line of the statement of account: same-named server rows
/// merged, with the best date the extractors could find.
#[derive(Debug, Clone, PartialEq)]
pub struct SoaLine {
    pub service_name: Option<String>,
    pub quantity: f64,
    pub unit_price: Option<f64>,
    pub total: f64,
    pub date: Option<NaiveDate>,
}

/// The reconciled statement of account. Read-only; rebuilding it is the only
/// way it ever changes.
#[derive(Debug)]
pub struct SoaView {
    pub patient_id: u64,
    pub bill_id: Option<u64>,
    pub lines: Vec<SoaLine>,
    pub payments: Vec<PaymentRecord>,
    pub current_charges: f64,
    pub current_payments: f64,
    /// Floored at zero, for display.
    pub outstanding_balance: f64,
    /// The unfloored reconciled value; payment validation uses this so an
    /// overpayment is rejected even when the display reads 0.
    pub outstanding_unfloored: f64,
}

/// Build the reconciled view from one SOA fetch. A response whose admission
/// belongs to another patient is rejected as stale, so a late fetch can
/// never be applied after the selected patient has changed.
pub fn build_view(patient_id: u64, response: &SoaResponse) -> Result<SoaView> {
    if let Some(admission) = &response.admission {
        if admission.patient_id != patient_id {
            return Err(BillingError::StaleResponse {
                expected: patient_id,
                got: admission.patient_id,
            });
        }
    }

    let mut lines = aggregate_by_name(&response.itemized_charges);
    // Stable, so undated lines keep their relative order at the end.
    lines.sort_by_key(|l| l.date.unwrap_or(NaiveDate::MAX));

    let computed_charges: f64 = lines.iter().map(|l| l.total).sum();
    let computed_payments: f64 = response.payment_history.iter().map(|p| p.amount).sum();

    let totals = response.totals.clone().unwrap_or_default();
    let current_charges = numeric_or(&totals.current_charges, computed_charges);
    let current_payments = numeric_or(&totals.current_payments, computed_payments);
    let outstanding_unfloored = numeric(&totals.outstanding_balance)
        .or_else(|| numeric(&totals.active_balance))
        .unwrap_or(current_charges - current_payments);

    Ok(SoaView {
        patient_id,
        bill_id: response.admission.as_ref().and_then(|a| a.bill_id),
        lines,
        payments: response.payment_history.clone(),
        current_charges,
        current_payments,
        outstanding_balance: outstanding_unfloored.max(0.0),
        outstanding_unfloored,
    })
}

/// Merge server rows by service name. Server data may repeat a service
/// across dates without a reusable id, so the name is the identity here;
/// rows with no name at all stay distinct rather than erroring.
fn aggregate_by_name(rows: &[ItemizedCharge]) -> Vec<SoaLine> {
    let mut out: Vec<SoaLine> = Vec::with_capacity(rows.len());

    for row in rows {
        let quantity = row.quantity.unwrap_or(1.0);
        let total = row
            .total_price
            .unwrap_or_else(|| row.unit_price.unwrap_or(0.0) * quantity);
        let date = charge_date(row);

        let merged = row.service_name.as_deref().and_then(|name| {
            out.iter()
                .position(|l| l.service_name.as_deref() == Some(name))
        });

        match merged {
            Some(pos) => {
                let line = &mut out[pos];
                line.quantity += quantity;
                line.total += total;
                if line.unit_price.is_none() {
                    line.unit_price = row.unit_price;
                }
                if line.date.is_none() {
                    line.date = date;
                }
            }
            None => out.push(SoaLine {
                service_name: row.service_name.clone(),
                quantity,
                unit_price: row.unit_price,
                total,
                date,
            }),
        }
    }

    // A merged line with no per-row unit price falls back to total/quantity.
    for line in &mut out {
        if line.unit_price.is_none() && line.quantity > 0.0 {
            line.unit_price = Some(line.total / line.quantity);
        }
    }

    out
}

fn numeric(value: &Option<Value>) -> Option<f64> {
    let value = value.as_ref()?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn numeric_or(value: &Option<Value>, fallback: f64) -> f64 {
    numeric(value).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> SoaResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn same_named_rows_merge_with_summed_totals() {
        let resp = response(json!({
            "itemized_charges": [
                {"service_name": "Room - Ward", "quantity": 1, "unit_price": 800.0, "total_price": 800.0},
                {"service_name": "Newborn Screening", "quantity": 1, "total_price": 1750.0},
                {"service_name": "Room - Ward", "quantity": 2, "unit_price": 800.0, "total_price": 1600.0}
            ]
        }));
        let view = build_view(7, &resp).unwrap();

        assert_eq!(view.lines.len(), 2);
        let room = view
            .lines
            .iter()
            .find(|l| l.service_name.as_deref() == Some("Room - Ward"))
            .unwrap();
        assert_eq!(room.quantity, 3.0);
        assert!((room.total - 2400.0).abs() < 0.005);
        assert_eq!(room.unit_price, Some(800.0));
    }

    #[test]
    fn dated_rows_sort_ascending_undated_last_in_order() {
        let resp = response(json!({
            "itemized_charges": [
                {"service_name": "A (2025-01-05)"},
                {"service_name": "B", "created_at": "2025-01-01"},
                {"service_name": "C"}
            ]
        }));
        let view = build_view(7, &resp).unwrap();
        let names: Vec<_> = view
            .lines
            .iter()
            .map(|l| l.service_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["B", "A (2025-01-05)", "C"]);
    }

    #[test]
    fn undated_rows_keep_relative_order() {
        let resp = response(json!({
            "itemized_charges": [
                {"service_name": "C"},
                {"service_name": "D"},
                {"service_name": "B", "created_at": "2025-01-01"}
            ]
        }));
        let view = build_view(7, &resp).unwrap();
        let names: Vec<_> = view
            .lines
            .iter()
            .map(|l| l.service_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["B", "C", "D"]);
    }

    #[test]
    fn nameless_rows_stay_distinct() {
        let resp = response(json!({
            "itemized_charges": [
                {"total_price": 100.0},
                {"total_price": 200.0}
            ]
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.lines.len(), 2);
        assert!((view.current_charges - 300.0).abs() < 0.005);
    }

    #[test]
    fn server_totals_beat_computed_sums() {
        let resp = response(json!({
            "itemized_charges": [
                {"service_name": "A", "total_price": 480.0}
            ],
            "totals": {"current_charges": 500.0}
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.current_charges, 500.0);
    }

    #[test]
    fn numeric_strings_count_as_server_totals() {
        let resp = response(json!({
            "itemized_charges": [{"service_name": "A", "total_price": 480.0}],
            "payment_history": [{"amount": 100.0}],
            "totals": {"current_charges": "500.00", "outstanding_balance": "bogus"}
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.current_charges, 500.0);
        // Non-numeric outstanding falls through to charges - payments.
        assert!((view.outstanding_unfloored - 400.0).abs() < 0.005);
    }

    #[test]
    fn active_balance_is_an_alias_for_outstanding() {
        let resp = response(json!({
            "totals": {"active_balance": 320.5}
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.outstanding_unfloored, 320.5);
        assert_eq!(view.outstanding_balance, 320.5);
    }

    #[test]
    fn display_balance_floors_at_zero_but_validation_value_does_not() {
        let resp = response(json!({
            "itemized_charges": [{"service_name": "A", "total_price": 100.0}],
            "payment_history": [{"amount": 150.0}]
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.outstanding_balance, 0.0);
        assert!((view.outstanding_unfloored - (-50.0)).abs() < 0.005);
    }

    #[test]
    fn response_for_another_patient_is_stale() {
        let resp = response(json!({
            "admission": {"id": 1, "patient_id": 8}
        }));
        let err = build_view(7, &resp).unwrap_err();
        assert!(matches!(
            err,
            BillingError::StaleResponse { expected: 7, got: 8 }
        ));
    }

    #[test]
    fn merged_line_without_unit_price_recomputes_it() {
        let resp = response(json!({
            "itemized_charges": [
                {"service_name": "A", "quantity": 2, "total_price": 100.0},
                {"service_name": "A", "quantity": 2, "total_price": 100.0}
            ]
        }));
        let view = build_view(7, &resp).unwrap();
        assert_eq!(view.lines[0].unit_price, Some(50.0));
    }
}
