use serde::{Deserialize, Serialize};

/// Raw slot listing as returned by the upstream PMS API. The upstream emits
/// two divergent layouts (and the occasional garbage record), so input stays
/// loosely typed until shape classification.
pub type RawSlotRecord = serde_json::Value;

/// The unified slot representation all downstream consumers work with.
///
/// End time, category, location and every other upstream field are
/// deliberately dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSlot {
    pub date: String,
    pub start_time: String,
    pub provider: String,
}
