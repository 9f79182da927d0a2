mod aggregate;
mod finalize;
mod staging;

pub use aggregate::{aggregate_by_id, merge_into, set_quantity};
pub use finalize::{build_charge_request, finalize, room_fallback};
pub use staging::StagingStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One staged line: a service selection with its price denormalized at the
/// moment of staging, so later catalog edits don't reprice staged work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChargeLineItem {
    pub service_id: u64,
    pub service_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl ChargeLineItem {
    pub fn total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A batch of staged selections for one patient. At most one group per
/// patient is "open": re-staging merges into the last group rather than
/// appending a new one. The Vec-of-groups shape is kept because that is what
/// the persisted JSON has always looked like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeGroup {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub items: Vec<ChargeLineItem>,
}
