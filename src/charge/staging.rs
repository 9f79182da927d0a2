use std::collections::BTreeMap;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::charge::{aggregate_by_id, merge_into, set_quantity, ChargeGroup, ChargeLineItem};
use crate::store::KvStore;

/// Per-patient staged charges, persisted under one facility-scoped key
/// (`pending_charges_<facility>`). Patients are isolated map entries; every
/// mutation is a whole read-modify-write of that key.
pub struct StagingStore<S: KvStore> {
    store: S,
    key: String,
}

type PatientGroups = BTreeMap<String, Vec<ChargeGroup>>;

impl<S: KvStore> StagingStore<S> {
    pub fn new(store: S, facility_id: &str) -> Self {
        Self {
            store,
            key: format!("pending_charges_{facility_id}"),
        }
    }

    /// Stage selections for a patient. The first save creates a group; later
    /// saves merge into the last group and refresh its timestamp, so a
    /// patient has at most one open group accumulating charges.
    pub fn stage(&mut self, patient_id: u64, items: Vec<ChargeLineItem>) {
        let items = aggregate_by_id(&items);
        let mut map = self.read_map();
        let groups = map.entry(patient_id.to_string()).or_default();

        match groups.len().checked_sub(1) {
            Some(last) => {
                let group = &mut groups[last];
                merge_into(&mut group.items, &items);
                group.saved_at = Utc::now();
            }
            None => groups.push(ChargeGroup {
                id: Uuid::now_v7().to_string(),
                saved_at: Utc::now(),
                items,
            }),
        }

        self.write_map(&map);
    }

    /// Staged groups for a patient, oldest first. Empty on any read failure.
    pub fn groups(&self, patient_id: u64) -> Vec<ChargeGroup> {
        self.read_map()
            .remove(&patient_id.to_string())
            .unwrap_or_default()
    }

    /// Delete one staged group. Returns false when no group matched.
    pub fn remove_group(&mut self, patient_id: u64, group_id: &str) -> bool {
        let mut map = self.read_map();
        let Some(groups) = map.get_mut(&patient_id.to_string()) else {
            return false;
        };
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        let removed = groups.len() != before;
        if groups.is_empty() {
            map.remove(&patient_id.to_string());
        }
        if removed {
            self.write_map(&map);
        }
        removed
    }

    /// Change one staged line's quantity in the patient's open group.
    /// Quantity zero removes the line (and an emptied group with it).
    /// Returns false when the service was never staged.
    pub fn set_item_quantity(&mut self, patient_id: u64, service_id: u64, quantity: i64) -> bool {
        let mut map = self.read_map();
        let Some(groups) = map.get_mut(&patient_id.to_string()) else {
            return false;
        };
        let Some(last) = groups.len().checked_sub(1) else {
            return false;
        };
        let group = &mut groups[last];
        if !group.items.iter().any(|i| i.service_id == service_id) {
            return false;
        }

        set_quantity(&mut group.items, service_id, quantity);
        group.saved_at = Utc::now();
        if group.items.is_empty() {
            groups.remove(last);
        }
        if groups.is_empty() {
            map.remove(&patient_id.to_string());
        }
        self.write_map(&map);
        true
    }

    /// Drop everything staged for a patient. Called only after the server
    /// confirms finalization, never optimistically.
    pub fn clear(&mut self, patient_id: u64) {
        let mut map = self.read_map();
        if map.remove(&patient_id.to_string()).is_some() {
            self.write_map(&map);
        }
    }

    fn read_map(&self) -> PatientGroups {
        let Some(raw) = self.store.get(&self.key) else {
            return PatientGroups::new();
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(key = %self.key, error = %e, "staged charges unreadable; starting from empty");
                PatientGroups::new()
            }
        }
    }

    fn write_map(&mut self, map: &PatientGroups) {
        match serde_json::to_string(map) {
            Ok(raw) => self.store.set(&self.key, &raw),
            Err(e) => warn!(key = %self.key, error = %e, "failed to serialize staged charges"),
        }
    }
}
