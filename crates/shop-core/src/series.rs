//! Ordered key/value series exchanged with callers.
//!
//! Curves and time series coming out of the engine are represented as a
//! [`Series`]: parallel key and value vectors with an optional numeric name.
//! The name carries the curve reference id for xy curves.

use serde::{Deserialize, Serialize};

use crate::error::{ShopError, ShopResult};
use crate::time::ShopDateTime;

/// An ordered sequence of `(key, value)` pairs.
///
/// Keys and values always have the same length. Order is preserved exactly
/// as received from, or handed to, the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SeriesParts<K>",
    bound(deserialize = "K: Deserialize<'de>")
)]
pub struct Series<K> {
    name: Option<f64>,
    index: Vec<K>,
    values: Vec<f64>,
}

// Deserialization goes through `Series::new` so lengths are checked.
#[derive(Deserialize)]
struct SeriesParts<K> {
    name: Option<f64>,
    index: Vec<K>,
    values: Vec<f64>,
}

impl<K> TryFrom<SeriesParts<K>> for Series<K> {
    type Error = ShopError;

    fn try_from(parts: SeriesParts<K>) -> ShopResult<Self> {
        let series = Series::new(parts.index, parts.values)?;
        Ok(match parts.name {
            Some(name) => series.with_name(name),
            None => series,
        })
    }
}

/// Curve keyed by a numeric x value.
pub type XyCurve = Series<f64>;

/// Curve keyed by text.
pub type SyCurve = Series<String>;

/// Series keyed by calendar timestamps.
pub type TimeSeries = Series<ShopDateTime>;

impl<K> Series<K> {
    /// Build a series from parallel key and value vectors.
    pub fn new(index: Vec<K>, values: Vec<f64>) -> ShopResult<Self> {
        if index.len() != values.len() {
            return Err(ShopError::lengths("index", index.len(), "values", values.len()));
        }
        Ok(Self {
            name: None,
            index,
            values,
        })
    }

    /// Build a series from `(key, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let (index, values) = pairs.into_iter().unzip();
        Self {
            name: None,
            index,
            values,
        }
    }

    pub fn with_name(mut self, name: f64) -> Self {
        self.name = Some(name);
        self
    }

    pub fn name(&self) -> Option<f64> {
        self.name
    }

    pub fn index(&self) -> &[K] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    /// Split into `(name, index, values)`.
    pub fn into_parts(self) -> (Option<f64>, Vec<K>, Vec<f64>) {
        (self.name, self.index, self.values)
    }
}

/// Slice concatenated curve-array payloads into one curve per reference.
///
/// `n_points[i]` points starting at the running offset belong to the curve
/// named `references[i]`.
pub fn split_curve_array(
    references: &[f64],
    n_points: &[i64],
    x: &[f64],
    y: &[f64],
) -> ShopResult<Vec<XyCurve>> {
    if references.len() != n_points.len() {
        return Err(ShopError::lengths(
            "references",
            references.len(),
            "n_points",
            n_points.len(),
        ));
    }
    if x.len() != y.len() {
        return Err(ShopError::lengths("x", x.len(), "y", y.len()));
    }

    let mut counts = Vec::with_capacity(n_points.len());
    for &n in n_points {
        let n = usize::try_from(n)
            .map_err(|_| ShopError::ShapeMismatch(format!("negative point count {n}")))?;
        counts.push(n);
    }
    let total: usize = counts.iter().sum();
    if total != x.len() {
        return Err(ShopError::ShapeMismatch(format!(
            "point counts sum to {total} but {} points were supplied",
            x.len()
        )));
    }

    let mut curves = Vec::with_capacity(references.len());
    let mut offset = 0;
    for (&reference, n) in references.iter().zip(counts) {
        let end = offset + n;
        let curve = Series::new(x[offset..end].to_vec(), y[offset..end].to_vec())?
            .with_name(reference);
        curves.push(curve);
        offset = end;
    }
    Ok(curves)
}

/// Flattened form of a curve array, in the layout the engine expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatCurveArray {
    pub references: Vec<f64>,
    pub n_points: Vec<i64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Concatenate curves in order. Unnamed curves get reference `0.0`.
pub fn flatten_curve_array(curves: &[XyCurve]) -> FlatCurveArray {
    let mut flat = FlatCurveArray::default();
    for curve in curves {
        flat.references.push(curve.name().unwrap_or(0.0));
        flat.n_points.push(curve.len() as i64);
        flat.x.extend_from_slice(curve.index());
        flat.y.extend_from_slice(curve.values());
    }
    flat
}
