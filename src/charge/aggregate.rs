use std::collections::HashMap;

use crate::charge::ChargeLineItem;

/// Collapse duplicate service selections into one line per service id,
/// summing quantities. First-occurrence order and first-seen unit price are
/// preserved, so aggregating an already-aggregated list is a no-op.
pub fn aggregate_by_id(items: &[ChargeLineItem]) -> Vec<ChargeLineItem> {
    let mut out: Vec<ChargeLineItem> = Vec::with_capacity(items.len());
    let mut index: HashMap<u64, usize> = HashMap::new();

    for item in items {
        match index.get(&item.service_id) {
            Some(&pos) => out[pos].quantity += item.quantity,
            None => {
                index.insert(item.service_id, out.len());
                out.push(item.clone());
            }
        }
    }

    out
}

/// Merge `incoming` into `existing` under the staging rule: quantities sum
/// for a matching service id, unmatched lines append in arrival order.
pub fn merge_into(existing: &mut Vec<ChargeLineItem>, incoming: &[ChargeLineItem]) {
    for item in incoming {
        match existing.iter().position(|e| e.service_id == item.service_id) {
            Some(pos) => existing[pos].quantity += item.quantity,
            None => existing.push(item.clone()),
        }
    }
}

/// Set a line's quantity in place. A quantity of zero (or below, for callers
/// doing decrement arithmetic) deletes the line rather than keeping a
/// zero-quantity record.
pub fn set_quantity(items: &mut Vec<ChargeLineItem>, service_id: u64, quantity: i64) {
    if quantity <= 0 {
        items.retain(|i| i.service_id != service_id);
        return;
    }
    if let Some(line) = items.iter_mut().find(|i| i.service_id == service_id) {
        line.quantity = quantity as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, qty: u32, price: f64) -> ChargeLineItem {
        ChargeLineItem {
            service_id: id,
            service_name: format!("Service {id}"),
            unit_price: price,
            quantity: qty,
        }
    }

    #[test]
    fn duplicates_sum_quantities_and_totals() {
        let items = vec![item(1, 2, 150.0), item(2, 1, 500.0), item(1, 3, 150.0)];
        let agg = aggregate_by_id(&items);

        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].service_id, 1);
        assert_eq!(agg[0].quantity, 5);
        assert!((agg[0].total() - 750.0).abs() < 0.005);
        assert_eq!(agg[1].service_id, 2);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let items = vec![item(3, 1, 80.0), item(3, 4, 80.0), item(9, 2, 25.0)];
        let once = aggregate_by_id(&items);
        let twice = aggregate_by_id(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn sum_invariant_holds_across_duplicates() {
        let items = vec![item(5, 2, 120.5), item(5, 1, 120.5), item(5, 7, 120.5)];
        let individual: f64 = items.iter().map(|i| i.total()).sum();
        let agg = aggregate_by_id(&items);
        assert_eq!(agg.len(), 1);
        assert!((agg[0].total() - individual).abs() < 0.005);
        assert_eq!(agg[0].quantity, 10);
    }

    #[test]
    fn merge_sums_matching_and_appends_new() {
        let mut existing = vec![item(1, 2, 100.0)];
        merge_into(&mut existing, &[item(1, 3, 100.0), item(4, 1, 60.0)]);

        assert_eq!(existing.len(), 2);
        assert_eq!(existing[0].quantity, 5);
        assert_eq!(existing[1].service_id, 4);
    }

    #[test]
    fn zero_quantity_deletes_the_line() {
        let mut items = vec![item(1, 2, 100.0), item(2, 1, 50.0)];
        set_quantity(&mut items, 1, 0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].service_id, 2);

        set_quantity(&mut items, 2, 6);
        assert_eq!(items[0].quantity, 6);
    }
}
