use serde_json::Value;
use tracing::debug;

use crate::domain::{CanonicalSlot, RawSlotRecord};

/// The two record layouts the upstream is known to emit, plus the bucket for
/// everything that matches neither.
#[derive(Debug)]
enum RecordShape<'a> {
    /// Legacy layout: `date` + `times` + `doctor` object carrying a name.
    Legacy {
        date: &'a str,
        times: &'a [Value],
        doctor_name: &'a str,
    },
    /// Current layout: `available_on` + `slots` + `provider` string.
    Current {
        available_on: &'a str,
        slots: &'a [Value],
        provider: &'a str,
    },
    Unrecognized,
}

fn classify(record: &Value) -> RecordShape<'_> {
    let date = record
        .get("date")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let times = record.get("times").and_then(Value::as_array);
    let doctor_name = record
        .get("doctor")
        .and_then(|d| d.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    if let (Some(date), Some(times), Some(doctor_name)) = (date, times, doctor_name) {
        return RecordShape::Legacy {
            date,
            times,
            doctor_name,
        };
    }

    let available_on = record
        .get("available_on")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let slots = record.get("slots").and_then(Value::as_array);
    let provider = record
        .get("provider")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    if let (Some(available_on), Some(slots), Some(provider)) = (available_on, slots, provider) {
        return RecordShape::Current {
            available_on,
            slots,
            provider,
        };
    }

    RecordShape::Unrecognized
}

/// Reconciles heterogeneous upstream slot listings into the canonical
/// `{date, start_time, provider}` shape.
///
/// One canonical slot is emitted per usable start time, in record order then
/// sub-entry order. Records matching neither known layout are dropped
/// silently; a null or start-less entry inside a valid record skips that
/// entry only. Dates pass through untouched apart from the slash-to-dash
/// substitution on the current layout, and nothing is deduplicated.
pub fn normalize_slots(records: &[RawSlotRecord]) -> Vec<CanonicalSlot> {
    let mut normalized = Vec::new();

    for record in records {
        match classify(record) {
            RecordShape::Legacy {
                date,
                times,
                doctor_name,
            } => {
                for time in times {
                    if let Some(start) = time.as_str().filter(|s| !s.is_empty()) {
                        normalized.push(CanonicalSlot {
                            date: date.to_string(),
                            start_time: start.to_string(),
                            provider: doctor_name.to_string(),
                        });
                    }
                }
            }
            RecordShape::Current {
                available_on,
                slots,
                provider,
            } => {
                // available_on arrives as YYYY/MM/DD
                let date = available_on.replace('/', "-");
                for slot in slots {
                    let start = slot
                        .get("start")
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty());
                    if let Some(start) = start {
                        normalized.push(CanonicalSlot {
                            date: date.clone(),
                            start_time: start.to_string(),
                            provider: provider.to_string(),
                        });
                    }
                }
            }
            RecordShape::Unrecognized => {
                debug!("Dropping upstream record matching neither known layout");
            }
        }
    }

    normalized
}
