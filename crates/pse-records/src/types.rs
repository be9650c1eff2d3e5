//! Record data types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use pse_flow::{ReleaseType, Site};

pub type RecordId = String;

/// Calculator inputs as the user entered them, before the store assigns identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculationDraft {
    pub user_name: String,
    pub calculation_title: String,
    pub gas: String,
    pub release_type: ReleaseType,
    pub site: Site,
    #[serde(deserialize_with = "number_or_text")]
    pub p0: f64,
    pub p0_unit: String,
    #[serde(deserialize_with = "number_or_text")]
    pub p2: f64,
    pub p2_unit: String,
    #[serde(deserialize_with = "number_or_text")]
    pub t0: f64,
    pub t0_unit: String,
    #[serde(deserialize_with = "number_or_text")]
    pub area: f64,
    pub area_unit: String,
    #[serde(deserialize_with = "number_or_text")]
    pub duration: f64,
    pub duration_unit: String,
    #[serde(deserialize_with = "number_or_text")]
    pub cd: f64,
}

impl Default for CalculationDraft {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            calculation_title: String::new(),
            gas: "Natural Gas".to_string(),
            release_type: ReleaseType::Outdoor,
            site: Site::GtmUs,
            p0: 100.0,
            p0_unit: "psi(g)".to_string(),
            p2: 0.0,
            p2_unit: "psi(g)".to_string(),
            t0: 20.0,
            t0_unit: "°C".to_string(),
            area: 10.0,
            area_unit: "mm²".to_string(),
            duration: 10.0,
            duration_unit: "min".to_string(),
            cd: 0.61,
        }
    }
}

/// A saved calculation. Immutable once stored; removed by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CalculationRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    pub inputs: CalculationDraft,
}

impl CalculationRecord {
    /// Read one stored record leniently.
    ///
    /// Fields that do not deserialize on their own (`null`, `"abc"` for a number, an
    /// unknown site) are dropped so they take the form default. Fails only when the
    /// value is not a JSON object.
    pub fn from_stored_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = value else {
            return serde_json::from_value(value);
        };
        let readable: Map<String, Value> = fields
            .into_iter()
            .filter(|(key, field)| {
                let single = Map::from_iter([(key.clone(), field.clone())]);
                let ok = serde_json::from_value::<CalculationRecord>(Value::Object(single)).is_ok();
                if !ok {
                    debug!(field = %key, value = %field, "unreadable field, using default");
                }
                ok
            })
            .collect();
        serde_json::from_value(Value::Object(readable))
    }
}

impl CalculationDraft {
    pub fn into_record(self, id: RecordId, timestamp: String) -> CalculationRecord {
        CalculationRecord {
            id,
            timestamp,
            inputs: self,
        }
    }
}

/// Older files stored some numbers as strings (e.g. `"cd": "0.61"`).
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
