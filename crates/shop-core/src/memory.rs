//! In-process engine backed by a snapshot of attribute payloads.
//!
//! [`MemoryApi`] implements [`ShopApi`] over a map keyed by
//! `(object_type, object_name, attribute)`. It stands in for the native
//! engine in tests and lets the CLI inspect attributes dumped to JSON.
//!
//! ```json
//! {
//!   "time": { "time_unit": "hour", "start_time": "2022010100", ... },
//!   "attributes": [
//!     { "object_type": "reservoir", "object_name": "Rsv1", "attribute": "max_vol",
//!       "payload": { "kind": "double", "value": 12.5 } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ShopApi;
use crate::attribute::AttributeRef;
use crate::error::{ShopError, ShopResult};

/// Raw engine payload of one attribute, in engine layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredPayload {
    Int {
        value: i64,
    },
    IntArray {
        values: Vec<i64>,
    },
    Double {
        value: f64,
    },
    DoubleArray {
        values: Vec<f64>,
    },
    String {
        value: String,
    },
    StringArray {
        values: Vec<String>,
    },
    XyCurve {
        #[serde(default)]
        reference: f64,
        x: Vec<f64>,
        y: Vec<f64>,
    },
    SyCurve {
        s: Vec<String>,
        y: Vec<f64>,
    },
    XyCurveArray {
        references: Vec<f64>,
        n_points: Vec<i64>,
        x: Vec<f64>,
        y: Vec<f64>,
    },
    TxySeries {
        start_time: String,
        t: Vec<i64>,
        y: Vec<f64>,
    },
}

impl StoredPayload {
    fn kind(&self) -> &'static str {
        match self {
            StoredPayload::Int { .. } => "int",
            StoredPayload::IntArray { .. } => "int_array",
            StoredPayload::Double { .. } => "double",
            StoredPayload::DoubleArray { .. } => "double_array",
            StoredPayload::String { .. } => "string",
            StoredPayload::StringArray { .. } => "string_array",
            StoredPayload::XyCurve { .. } => "xy_curve",
            StoredPayload::SyCurve { .. } => "sy_curve",
            StoredPayload::XyCurveArray { .. } => "xy_curve_array",
            StoredPayload::TxySeries { .. } => "txy_series",
        }
    }
}

/// Global time state of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeState {
    pub time_unit: String,
    /// IANA zone name, empty for zone-less models.
    pub time_zone: String,
    pub start_time: String,
    pub end_time: String,
    pub time_resolution_t: Vec<i64>,
    pub time_resolution_y: Vec<f64>,
}

impl Default for TimeState {
    fn default() -> Self {
        Self {
            time_unit: "hour".to_string(),
            time_zone: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            time_resolution_t: vec![0],
            time_resolution_y: vec![1.0],
        }
    }
}

/// One attribute record of a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAttribute {
    pub object_type: String,
    pub object_name: String,
    pub attribute: String,
    pub payload: StoredPayload,
}

/// Serialized form of a [`MemoryApi`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub time: TimeState,
    pub attributes: Vec<StoredAttribute>,
}

type Key = (String, String, String);

fn key(attr: &AttributeRef<'_>) -> Key {
    (
        attr.object_type.to_string(),
        attr.object_name.to_string(),
        attr.attribute.to_string(),
    )
}

/// An engine whose state lives entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    time: TimeState,
    attributes: BTreeMap<Key, StoredPayload>,
}

impl MemoryApi {
    pub fn new(time: TimeState) -> Self {
        Self {
            time,
            attributes: BTreeMap::new(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let attributes = snapshot
            .attributes
            .into_iter()
            .map(|a| ((a.object_type, a.object_name, a.attribute), a.payload))
            .collect();
        Self {
            time: snapshot.time,
            attributes,
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        let attributes = self
            .attributes
            .iter()
            .map(|((object_type, object_name, attribute), payload)| StoredAttribute {
                object_type: object_type.clone(),
                object_name: object_name.clone(),
                attribute: attribute.clone(),
                payload: payload.clone(),
            })
            .collect();
        Snapshot {
            time: self.time.clone(),
            attributes,
        }
    }

    /// Load a JSON snapshot file.
    pub fn load_from(path: &Path) -> ShopResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        debug!(
            "Loaded snapshot {} with {} attributes",
            path.display(),
            snapshot.attributes.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the current state as a JSON snapshot file.
    pub fn save_to(&self, path: &Path) -> ShopResult<()> {
        let contents = serde_json::to_string_pretty(&self.to_snapshot())?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeState {
        &mut self.time
    }

    /// Store a raw payload, replacing any previous one.
    pub fn insert(&mut self, attr: &AttributeRef<'_>, payload: StoredPayload) {
        self.attributes.insert(key(attr), payload);
    }

    /// Raw payload of an attribute, if present.
    pub fn payload(&self, attr: &AttributeRef<'_>) -> Option<&StoredPayload> {
        self.attributes.get(&key(attr))
    }

    fn lookup(&self, attr: &AttributeRef<'_>) -> ShopResult<&StoredPayload> {
        self.payload(attr)
            .ok_or_else(|| ShopError::Engine(format!("attribute {attr} is not set")))
    }
}

fn wrong_kind(attr: &AttributeRef<'_>, expected: &str, payload: &StoredPayload) -> ShopError {
    ShopError::Engine(format!(
        "attribute {attr} holds a {} payload, not {expected}",
        payload.kind()
    ))
}

// Generates a getter that destructures one payload kind.
macro_rules! payload_getter {
    ($name:ident, $ret:ty, $expected:literal, $pat:pat => $out:expr) => {
        fn $name(&self, attr: &AttributeRef<'_>) -> ShopResult<$ret> {
            match self.lookup(attr)? {
                $pat => Ok($out),
                other => Err(wrong_kind(attr, $expected, other)),
            }
        }
    };
}

impl ShopApi for MemoryApi {
    payload_getter!(get_int_value, i64, "int", StoredPayload::Int { value } => *value);
    payload_getter!(get_int_array, Vec<i64>, "int_array", StoredPayload::IntArray { values } => values.clone());
    payload_getter!(get_double_value, f64, "double", StoredPayload::Double { value } => *value);
    payload_getter!(get_double_array, Vec<f64>, "double_array", StoredPayload::DoubleArray { values } => values.clone());
    payload_getter!(get_string_value, String, "string", StoredPayload::String { value } => value.clone());
    payload_getter!(get_string_array, Vec<String>, "string_array", StoredPayload::StringArray { values } => values.clone());
    payload_getter!(get_xy_curve_x, Vec<f64>, "xy_curve", StoredPayload::XyCurve { x, .. } => x.clone());
    payload_getter!(get_xy_curve_y, Vec<f64>, "xy_curve", StoredPayload::XyCurve { y, .. } => y.clone());
    payload_getter!(get_xy_curve_reference, f64, "xy_curve", StoredPayload::XyCurve { reference, .. } => *reference);
    payload_getter!(get_sy_curve_s, Vec<String>, "sy_curve", StoredPayload::SyCurve { s, .. } => s.clone());
    payload_getter!(get_sy_curve_y, Vec<f64>, "sy_curve", StoredPayload::SyCurve { y, .. } => y.clone());
    payload_getter!(get_xy_curve_array_references, Vec<f64>, "xy_curve_array", StoredPayload::XyCurveArray { references, .. } => references.clone());
    payload_getter!(get_xy_curve_array_n_points, Vec<i64>, "xy_curve_array", StoredPayload::XyCurveArray { n_points, .. } => n_points.clone());
    payload_getter!(get_xy_curve_array_x, Vec<f64>, "xy_curve_array", StoredPayload::XyCurveArray { x, .. } => x.clone());
    payload_getter!(get_xy_curve_array_y, Vec<f64>, "xy_curve_array", StoredPayload::XyCurveArray { y, .. } => y.clone());
    payload_getter!(get_txy_series_start_time, String, "txy_series", StoredPayload::TxySeries { start_time, .. } => start_time.clone());
    payload_getter!(get_txy_series_t, Vec<i64>, "txy_series", StoredPayload::TxySeries { t, .. } => t.clone());
    payload_getter!(get_txy_series_y, Vec<f64>, "txy_series", StoredPayload::TxySeries { y, .. } => y.clone());

    fn get_time_unit(&self) -> ShopResult<String> {
        Ok(self.time.time_unit.clone())
    }

    fn get_time_zone(&self) -> ShopResult<String> {
        Ok(self.time.time_zone.clone())
    }

    fn get_start_time(&self) -> ShopResult<String> {
        Ok(self.time.start_time.clone())
    }

    fn get_end_time(&self) -> ShopResult<String> {
        Ok(self.time.end_time.clone())
    }

    fn get_time_resolution_t(&self) -> ShopResult<Vec<i64>> {
        Ok(self.time.time_resolution_t.clone())
    }

    fn get_time_resolution_y(&self) -> ShopResult<Vec<f64>> {
        Ok(self.time.time_resolution_y.clone())
    }

    fn set_int_value(&mut self, attr: &AttributeRef<'_>, value: i64) -> ShopResult<()> {
        self.insert(attr, StoredPayload::Int { value });
        Ok(())
    }

    fn set_int_array(&mut self, attr: &AttributeRef<'_>, values: &[i64]) -> ShopResult<()> {
        self.insert(attr, StoredPayload::IntArray { values: values.to_vec() });
        Ok(())
    }

    fn set_double_value(&mut self, attr: &AttributeRef<'_>, value: f64) -> ShopResult<()> {
        self.insert(attr, StoredPayload::Double { value });
        Ok(())
    }

    fn set_double_array(&mut self, attr: &AttributeRef<'_>, values: &[f64]) -> ShopResult<()> {
        self.insert(attr, StoredPayload::DoubleArray { values: values.to_vec() });
        Ok(())
    }

    fn set_string_value(&mut self, attr: &AttributeRef<'_>, value: &str) -> ShopResult<()> {
        self.insert(attr, StoredPayload::String { value: value.to_string() });
        Ok(())
    }

    fn set_string_array(&mut self, attr: &AttributeRef<'_>, values: &[String]) -> ShopResult<()> {
        self.insert(attr, StoredPayload::StringArray { values: values.to_vec() });
        Ok(())
    }

    fn set_xy_curve(
        &mut self,
        attr: &AttributeRef<'_>,
        reference: f64,
        x: &[f64],
        y: &[f64],
    ) -> ShopResult<()> {
        self.insert(
            attr,
            StoredPayload::XyCurve {
                reference,
                x: x.to_vec(),
                y: y.to_vec(),
            },
        );
        Ok(())
    }

    fn set_sy_curve(&mut self, attr: &AttributeRef<'_>, s: &[String], y: &[f64]) -> ShopResult<()> {
        self.insert(
            attr,
            StoredPayload::SyCurve {
                s: s.to_vec(),
                y: y.to_vec(),
            },
        );
        Ok(())
    }

    fn set_xy_curve_array(
        &mut self,
        attr: &AttributeRef<'_>,
        references: &[f64],
        n_points: &[i64],
        x: &[f64],
        y: &[f64],
    ) -> ShopResult<()> {
        self.insert(
            attr,
            StoredPayload::XyCurveArray {
                references: references.to_vec(),
                n_points: n_points.to_vec(),
                x: x.to_vec(),
                y: y.to_vec(),
            },
        );
        Ok(())
    }

    fn set_txy_series(
        &mut self,
        attr: &AttributeRef<'_>,
        start_time: &str,
        t: &[i64],
        y: &[f64],
    ) -> ShopResult<()> {
        self.insert(
            attr,
            StoredPayload::TxySeries {
                start_time: start_time.to_string(),
                t: t.to_vec(),
                y: y.to_vec(),
            },
        );
        Ok(())
    }
}
