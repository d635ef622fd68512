//! Attribute type tags, references and values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::series::{SyCurve, TimeSeries, XyCurve};

/// How an attribute's value is encoded by the engine.
///
/// The set is closed; the marshaller matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeTypeTag {
    Int,
    IntArray,
    Double,
    DoubleArray,
    String,
    StringArray,
    /// Curve keyed by numeric x, named by a reference id.
    Xy,
    /// Curve keyed by text.
    Sy,
    /// Ordered array of xy curves.
    XyArray,
    /// Time series, offsets relative to a start time.
    Txy,
}

impl AttributeTypeTag {
    /// The engine's name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeTypeTag::Int => "int",
            AttributeTypeTag::IntArray => "int_array",
            AttributeTypeTag::Double => "double",
            AttributeTypeTag::DoubleArray => "double_array",
            AttributeTypeTag::String => "string",
            AttributeTypeTag::StringArray => "string_array",
            AttributeTypeTag::Xy => "xy",
            AttributeTypeTag::Sy => "sy",
            AttributeTypeTag::XyArray => "xy_array",
            AttributeTypeTag::Txy => "txy",
        }
    }

    /// Get all attribute kinds.
    pub fn all() -> &'static [AttributeTypeTag] {
        &[
            AttributeTypeTag::Int,
            AttributeTypeTag::IntArray,
            AttributeTypeTag::Double,
            AttributeTypeTag::DoubleArray,
            AttributeTypeTag::String,
            AttributeTypeTag::StringArray,
            AttributeTypeTag::Xy,
            AttributeTypeTag::Sy,
            AttributeTypeTag::XyArray,
            AttributeTypeTag::Txy,
        ]
    }
}

impl fmt::Display for AttributeTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeTypeTag {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeTypeTag::all()
            .iter()
            .copied()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| ShopError::UnsupportedType(s.to_string()))
    }
}

/// Identifies one attribute of one engine object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeRef<'a> {
    pub object_type: &'a str,
    pub object_name: &'a str,
    pub attribute: &'a str,
}

impl<'a> AttributeRef<'a> {
    pub fn new(object_type: &'a str, object_name: &'a str, attribute: &'a str) -> Self {
        Self {
            object_type,
            object_name,
            attribute,
        }
    }
}

impl fmt::Display for AttributeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.object_type, self.object_name, self.attribute)
    }
}

/// A marshalled attribute value.
///
/// Reads produce the variant matching the requested tag. Writes accept the
/// same variants; a `txy` attribute additionally accepts
/// [`AttributeValue::Double`] as a constant over the whole horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Int(i64),
    IntArray(Vec<i64>),
    Double(f64),
    DoubleArray(Vec<f64>),
    String(String),
    StringArray(Vec<String>),
    Xy(XyCurve),
    Sy(SyCurve),
    XyArray(Vec<XyCurve>),
    Txy(TimeSeries),
}

impl AttributeValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Int(_) => "int",
            AttributeValue::IntArray(_) => "int_array",
            AttributeValue::Double(_) => "double",
            AttributeValue::DoubleArray(_) => "double_array",
            AttributeValue::String(_) => "string",
            AttributeValue::StringArray(_) => "string_array",
            AttributeValue::Xy(_) => "xy",
            AttributeValue::Sy(_) => "sy",
            AttributeValue::XyArray(_) => "xy_array",
            AttributeValue::Txy(_) => "txy",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn into_int_array(self) -> Option<Vec<i64>> {
        match self {
            AttributeValue::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_double_array(self) -> Option<Vec<f64>> {
        match self {
            AttributeValue::DoubleArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_string_array(self) -> Option<Vec<String>> {
        match self {
            AttributeValue::StringArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_xy(self) -> Option<XyCurve> {
        match self {
            AttributeValue::Xy(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_txy(self) -> Option<TimeSeries> {
        match self {
            AttributeValue::Txy(v) => Some(v),
            _ => None,
        }
    }
}
