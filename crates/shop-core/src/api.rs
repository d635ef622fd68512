//! The engine call boundary.
//!
//! [`ShopApi`] mirrors the engine's flat, per-type call surface. The host
//! environment supplies the implementation (a native binding, a remote
//! session, or [`crate::memory::MemoryApi`] for tests and snapshots). Calls
//! are synchronous and non-reentrant, so getters borrow the engine shared and
//! setters borrow it exclusively.

use crate::attribute::AttributeRef;
use crate::error::ShopResult;

/// Synchronous engine interface, one method per engine operation.
pub trait ShopApi {
    // === Scalars and arrays ===
    fn get_int_value(&self, attr: &AttributeRef<'_>) -> ShopResult<i64>;
    fn get_int_array(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<i64>>;
    fn get_double_value(&self, attr: &AttributeRef<'_>) -> ShopResult<f64>;
    fn get_double_array(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_string_value(&self, attr: &AttributeRef<'_>) -> ShopResult<String>;
    fn get_string_array(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<String>>;

    // === Curves ===
    fn get_xy_curve_x(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_xy_curve_y(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_xy_curve_reference(&self, attr: &AttributeRef<'_>) -> ShopResult<f64>;
    fn get_sy_curve_s(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<String>>;
    fn get_sy_curve_y(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_xy_curve_array_references(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_xy_curve_array_n_points(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<i64>>;
    fn get_xy_curve_array_x(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;
    fn get_xy_curve_array_y(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;

    // === Time series ===
    fn get_txy_series_start_time(&self, attr: &AttributeRef<'_>) -> ShopResult<String>;
    fn get_txy_series_t(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<i64>>;
    fn get_txy_series_y(&self, attr: &AttributeRef<'_>) -> ShopResult<Vec<f64>>;

    // === Global time state ===
    /// Engine time unit name, e.g. `"minute"` or `"hour"`.
    fn get_time_unit(&self) -> ShopResult<String>;
    /// IANA zone name, empty when the model is zone-less.
    fn get_time_zone(&self) -> ShopResult<String>;
    fn get_start_time(&self) -> ShopResult<String>;
    fn get_end_time(&self) -> ShopResult<String>;
    /// Breakpoint offsets of the time resolution, in time units.
    fn get_time_resolution_t(&self) -> ShopResult<Vec<i64>>;
    /// Step length in effect from each breakpoint.
    fn get_time_resolution_y(&self) -> ShopResult<Vec<f64>>;

    // === Setters ===
    fn set_int_value(&mut self, attr: &AttributeRef<'_>, value: i64) -> ShopResult<()>;
    fn set_int_array(&mut self, attr: &AttributeRef<'_>, values: &[i64]) -> ShopResult<()>;
    fn set_double_value(&mut self, attr: &AttributeRef<'_>, value: f64) -> ShopResult<()>;
    fn set_double_array(&mut self, attr: &AttributeRef<'_>, values: &[f64]) -> ShopResult<()>;
    fn set_string_value(&mut self, attr: &AttributeRef<'_>, value: &str) -> ShopResult<()>;
    fn set_string_array(&mut self, attr: &AttributeRef<'_>, values: &[String]) -> ShopResult<()>;
    fn set_xy_curve(
        &mut self,
        attr: &AttributeRef<'_>,
        reference: f64,
        x: &[f64],
        y: &[f64],
    ) -> ShopResult<()>;
    fn set_sy_curve(&mut self, attr: &AttributeRef<'_>, s: &[String], y: &[f64]) -> ShopResult<()>;
    fn set_xy_curve_array(
        &mut self,
        attr: &AttributeRef<'_>,
        references: &[f64],
        n_points: &[i64],
        x: &[f64],
        y: &[f64],
    ) -> ShopResult<()>;
    fn set_txy_series(
        &mut self,
        attr: &AttributeRef<'_>,
        start_time: &str,
        t: &[i64],
        y: &[f64],
    ) -> ShopResult<()>;
}
