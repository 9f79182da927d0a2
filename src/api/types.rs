use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A billable catalog entry, owned by the server-side service catalog.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdmittedPatient {
    pub id: u64,
    pub name: String,
    pub admission_id: u64,
    #[serde(default)]
    pub room_price: Option<f64>,
    #[serde(default)]
    pub admitted_at: Option<String>,
}

/// One `{id, price, quantity}` triple of the charge request. Field names
/// are the billing server's, not ours.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ServiceLine {
    pub id: u64,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct ChargeRequest {
    pub patient_id: u64,
    pub admission_id: u64,
    pub services: Vec<ServiceLine>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FinalizedBill {
    #[serde(default)]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub balance_amount: Option<f64>,
    #[serde(default)]
    pub bill_date: Option<String>,
    #[serde(default)]
    pub items: Vec<BillItem>,
}

#[derive(Debug, Deserialize)]
pub struct BillItem {
    pub service_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A server-reported itemized charge row. The server does not promise a
/// stable schema for the date it was charged on (it varies by endpoint
/// version), so anything beyond the core fields is kept in `extra` for the
/// date-extraction heuristics to inspect.
#[derive(Debug, Deserialize, Clone)]
pub struct ItemizedCharge {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRecord {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Server-supplied SOA totals. Values arrive as JSON numbers or numeric
/// strings depending on the backend version, so they stay raw until the
/// reconciler applies the precedence rule.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SoaTotals {
    #[serde(default)]
    pub current_charges: Option<Value>,
    #[serde(default)]
    pub current_payments: Option<Value>,
    #[serde(default)]
    pub outstanding_balance: Option<Value>,
    /// Older servers report the outstanding balance under this name.
    #[serde(default)]
    pub active_balance: Option<Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Admission {
    pub id: u64,
    pub patient_id: u64,
    #[serde(default)]
    pub room_price: Option<f64>,
    #[serde(default)]
    pub bill_id: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SoaResponse {
    #[serde(default)]
    pub itemized_charges: Vec<ItemizedCharge>,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
    #[serde(default)]
    pub totals: Option<SoaTotals>,
    #[serde(default)]
    pub admission: Option<Admission>,
}

#[derive(Debug, Serialize)]
pub struct PaymentRequest {
    pub patient_id: u64,
    pub bill_id: Option<u64>,
    pub amount: f64,
    pub payment_method: String,
    pub payment_date: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentOutcome {
    pub payment: PaymentRecord,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
}
