//! Raw device status and DPS normalization.
//!
//! A status query returns a device id plus a sparse map of DPS keys to
//! opaque scalars. Keys are 1-based on the wire; values are whatever the
//! firmware reports (booleans, integers, hex strings). Normalization turns
//! that sparse map into a dense, 0-based positional vector so the schema
//! mapper can address fields by fixed position.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The raw reply of a single status query. Values are not decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatus {
    /// Device identifier as reported on the wire.
    #[serde(default, rename = "devId")]
    pub device_id: Option<String>,
    /// Sparse 1-based DPS map.
    #[serde(default)]
    pub dps: BTreeMap<String, Value>,
}

impl RawStatus {
    /// Whether the reply carries no data points at all. An empty status is
    /// the sentinel for an unreachable device.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dps.is_empty()
    }
}

/// Build the dense positional vector from a sparse DPS map.
///
/// Only digit-only keys survive; anything else is discarded silently. Each
/// surviving key is re-based from 1-based to 0-based, keys that would land
/// below zero are ignored, and every gap strictly below the highest present
/// index is filled with `None`. Numerically duplicate keys (`"1"` and
/// `"01"`) collapse to one position; the later one in key order wins. The
/// result satisfies `len == max(present index) + 1` whenever it is
/// non-empty.
#[must_use]
pub fn normalize_dps(dps: &BTreeMap<String, Value>) -> Vec<Option<Value>> {
    // BTreeMap iteration is lexicographic ("10" < "2"), so collect and
    // re-sort numerically before building the vector. The sort is stable so
    // duplicates keep their key order.
    let mut rebased: Vec<(usize, &Value)> = dps
        .iter()
        .filter_map(|(key, value)| {
            if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index: usize = key.parse().ok()?;
            index.checked_sub(1).map(|rebased| (rebased, value))
        })
        .collect();
    rebased.sort_by_key(|(index, _)| *index);

    let mut vector: Vec<Option<Value>> = Vec::with_capacity(rebased.len());
    for (index, value) in rebased {
        while vector.len() < index {
            vector.push(None);
        }
        if vector.len() == index {
            vector.push(Some(value.clone()));
        } else {
            vector[index] = Some(value.clone());
        }
    }
    vector
}
