use crate::api::types::{AdmittedPatient, ChargeRequest, Service, ServiceLine};
use crate::charge::{aggregate_by_id, ChargeGroup, StagingStore};
use crate::error::{BillingError, Result};
use crate::store::KvStore;

const PRICE_TOLERANCE: f64 = 0.005;

fn is_room_category(service: &Service) -> bool {
    let category = service.category.to_lowercase();
    category.contains("room") || category.contains("accommodation")
}

/// Locate the room/accommodation service to bill when nothing was staged.
/// Prefers an active room-category service whose price equals the patient's
/// room rate; otherwise any room-category service carries the patient's
/// stored rate as the unit price. Ties resolve to the lowest service id so
/// the choice does not depend on catalog ordering.
pub fn room_fallback(catalog: &[Service], room_price: f64) -> Option<ServiceLine> {
    let mut rooms: Vec<&Service> = catalog
        .iter()
        .filter(|s| s.is_active && is_room_category(s))
        .collect();
    rooms.sort_by_key(|s| s.id);

    if let Some(exact) = rooms
        .iter()
        .find(|s| (s.price - room_price).abs() < PRICE_TOLERANCE)
    {
        return Some(ServiceLine {
            id: exact.id,
            price: exact.price,
            quantity: 1,
        });
    }

    rooms.first().map(|s| ServiceLine {
        id: s.id,
        price: room_price,
        quantity: 1,
    })
}

/// Flatten staged groups into the charge request the billing server accepts.
/// An empty staging list falls back to a single room-accommodation line when
/// the patient has a room rate (the server expands quantity 1 into the actual
/// elapsed days); otherwise there is nothing chargeable.
pub fn build_charge_request(
    patient: &AdmittedPatient,
    groups: &[ChargeGroup],
    catalog: &[Service],
) -> Result<ChargeRequest> {
    let flattened: Vec<_> = groups.iter().flat_map(|g| g.items.iter().cloned()).collect();
    let aggregated = aggregate_by_id(&flattened);

    let services: Vec<ServiceLine> = if aggregated.is_empty() {
        let line = patient
            .room_price
            .and_then(|price| room_fallback(catalog, price))
            .ok_or(BillingError::NoChargeableItems)?;
        vec![line]
    } else {
        aggregated
            .iter()
            .map(|i| ServiceLine {
                id: i.service_id,
                price: i.unit_price,
                quantity: i.quantity,
            })
            .collect()
    };

    Ok(ChargeRequest {
        patient_id: patient.id,
        admission_id: patient.admission_id,
        services,
    })
}

/// Finalize a patient's staged charges through `post`. Staging is cleared
/// only after the server confirms; any error leaves it untouched.
pub fn finalize<S, F>(
    staging: &mut StagingStore<S>,
    patient: &AdmittedPatient,
    catalog: &[Service],
    post: F,
) -> Result<ChargeRequest>
where
    S: KvStore,
    F: FnOnce(&ChargeRequest) -> Result<()>,
{
    let groups = staging.groups(patient.id);
    let request = build_charge_request(patient, &groups, catalog)?;
    post(&request)?;
    staging.clear(patient.id);
    Ok(request)
}
