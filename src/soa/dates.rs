use chrono::NaiveDate;
use serde_json::Value;

use crate::api::types::ItemizedCharge;

/// One best-effort way of pulling a charge date out of a server row.
pub type DateExtractor = fn(&ItemizedCharge) -> Option<NaiveDate>;

/// Tried in order; the first hit wins. Keep the policy here — the sort in
/// the reconciler never needs to know where a date came from.
pub const EXTRACTORS: &[DateExtractor] = &[
    from_known_fields,
    from_nested_date,
    from_name_parenthetical,
    from_description,
];

/// Timestamp-ish fields the server has been seen to use, most trustworthy
/// first.
const DATE_FIELDS: &[&str] = &[
    "created_at",
    "date_added",
    "added_at",
    "service_date",
    "charge_date",
    "updated_at",
];

/// Resolve the display/sort date for a charge row, if any extractor can.
pub fn charge_date(row: &ItemizedCharge) -> Option<NaiveDate> {
    EXTRACTORS.iter().find_map(|extract| extract(row))
}

fn from_known_fields(row: &ItemizedCharge) -> Option<NaiveDate> {
    DATE_FIELDS.iter().find_map(|field| {
        row.extra
            .get(*field)
            .and_then(Value::as_str)
            .and_then(parse_datish)
    })
}

/// Some endpoints wrap the date in a sub-object, e.g. `{"date": {"date":
/// "2025-01-05 08:30:00", "timezone": "Asia/Manila"}}`.
fn from_nested_date(row: &ItemizedCharge) -> Option<NaiveDate> {
    match row.extra.get("date")? {
        Value::String(s) => parse_datish(s),
        Value::Object(inner) => inner
            .get("date")
            .and_then(Value::as_str)
            .or_else(|| inner.values().find_map(Value::as_str))
            .and_then(parse_datish),
        _ => None,
    }
}

/// Room charges carry their day in the name, e.g. "Room - Private (2025-01-05)".
fn from_name_parenthetical(row: &ItemizedCharge) -> Option<NaiveDate> {
    let name = row.service_name.as_deref()?;
    let open = name.find('(')?;
    let rest = &name[open + 1..];
    let close = rest.find(')')?;
    find_iso_date(&rest[..close])
}

fn from_description(row: &ItemizedCharge) -> Option<NaiveDate> {
    find_iso_date(row.description.as_deref()?)
}

/// Parse a date or date-time string in the formats the server emits.
fn parse_datish(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.fZ"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    // Timestamps with offsets ("2025-01-05T08:30:00+08:00")
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Scan free text for the first bare YYYY-MM-DD substring.
fn find_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    for start in 0..=bytes.len() - 10 {
        let window = &bytes[start..start + 10];
        let shaped = window.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !shaped {
            continue;
        }
        if let Some(date) = std::str::from_utf8(window)
            .ok()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        {
            return Some(date);
        }
    }
    None
}
