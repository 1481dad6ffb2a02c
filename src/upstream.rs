use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::RawSlotRecord;
use crate::error::Result;

/// Port over "fetch the raw slot listings" so handlers stay ignorant of the
/// transport. Tests swap in a fixture-backed source.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn fetch_slots(&self) -> Result<Vec<RawSlotRecord>>;
}

/// Production source: pulls the listings over HTTP from the configured
/// upstream base URL.
pub struct HttpSlotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSlotSource {
    pub fn new(client: reqwest::Client, upstream_url: &str) -> Self {
        Self {
            client,
            url: format!(
                "{}/mock-external-api/slots",
                upstream_url.trim_end_matches('/')
            ),
        }
    }
}

#[async_trait]
impl SlotSource for HttpSlotSource {
    async fn fetch_slots(&self) -> Result<Vec<RawSlotRecord>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let payload = response.bytes().await?;
        let records: Vec<RawSlotRecord> = serde_json::from_slice(&payload)?;
        info!("Fetched {} raw slot records from upstream", records.len());
        Ok(records)
    }
}

/// Fixture payload served by the mock upstream endpoint.
///
/// Deliberately dirty: it mixes both record layouts with a malformed date,
/// empty lists, a duplicate slot, a null time, a start-less slot, and records
/// missing the fields that make them classifiable at all.
pub fn mock_slot_listings() -> Vec<RawSlotRecord> {
    vec![
        json!({
            "date": "2025-07-20",
            "times": ["09:00", "10:30", "13:15"],
            "doctor": { "name": "Dr. Smith", "id": "d1001" },
            "type": "NewPatient",
        }),
        json!({
            "available_on": "2025/07/21",
            "slots": [
                { "start": "10:00", "end": "10:30" },
                { "start": "11:00", "end": "11:30" },
            ],
            "provider": "Dr. Lee",
            "category": "General",
        }),
        // Missing leading zero in month
        json!({
            "date": "2025-7-22",
            "times": ["08:00", "09:30"],
            "doctor": { "name": "Dr. Patel", "id": "d1002" },
            "extra_field": "should be ignored",
        }),
        json!({
            "available_on": "2025/07/23",
            "slots": [],
            "provider": "Dr. Gomez",
            "category": "General",
        }),
        // Duplicate slot
        json!({
            "available_on": "2025/07/24",
            "slots": [
                { "start": "14:00", "end": "14:30" },
                { "start": "14:00", "end": "14:30" },
            ],
            "provider": "Dr. Lee",
            "category": "General",
            "notes": "Double-booked",
        }),
        // Malformed entry: missing both date and available_on
        json!({
            "slots": [{ "start": "15:00", "end": "15:30" }],
            "provider": "Dr. Smith",
        }),
        json!({
            "date": "2025-07-25",
            "times": [],
            "doctor": { "name": "Dr. Smith", "id": "d1001" },
        }),
        json!({
            "available_on": "2025/07/26",
            "slots": [{ "start": "16:00", "end": "16:30" }],
            "provider": "Dr. O'Neil",
            "category": "Specialist",
            "location": "Room 2",
        }),
        json!({
            "date": "2025-07-27",
            "doctor": { "name": "Dr. Strange", "id": "d1003" },
        }),
        json!({
            "available_on": "2025/07/28",
            "slots": [{ "start": "17:00", "end": "17:30" }],
        }),
        json!({
            "date": "2025-07-29",
            "times": ["18:00", null, "19:00"],
            "doctor": { "name": "Dr. House", "id": "d1004" },
        }),
        json!({
            "available_on": "2025/07/30",
            "slots": [{ "end": "20:30" }, { "start": "20:00", "end": "20:30" }],
            "provider": "Dr. Watson",
        }),
    ]
}
