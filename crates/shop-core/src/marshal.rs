//! Attribute value marshalling between engine encodings and [`AttributeValue`].
//!
//! # Read direction
//!
//! | Tag | Engine calls | Result |
//! |-----|--------------|--------|
//! | `int`, `double`, `string` | single value | value unchanged |
//! | `*_array` | ordered sequence | sequence unchanged |
//! | `xy` | x, y, reference | series keyed by x, named by reference |
//! | `sy` | s, y | series keyed by text |
//! | `xy_array` | references, point counts, concatenated x and y | one named series per reference |
//! | `txy` | unit, zone, start time, offsets, values | series keyed by `start + offset * unit` |
//!
//! # Write direction
//!
//! The inverse of each read. A `txy` attribute can be written from a series
//! keyed by timestamps (offsets are measured from the engine's global start
//! time) or from a single constant, which is spread over the time resolution
//! breakpoints.
//!
//! Each conversion either completes or fails without sending anything to the
//! engine; validation happens before the setter is called.

use tracing::debug;

use crate::api::ShopApi;
use crate::attribute::{AttributeRef, AttributeTypeTag, AttributeValue};
use crate::error::{ShopError, ShopResult};
use crate::series::{flatten_curve_array, split_curve_array, Series, TimeSeries};
use crate::time::{get_shop_datetime, get_shop_timestring, ShopDateTime, TimeUnit};

/// Fetch an attribute and convert it according to `tag`.
pub fn get_attribute_value<A>(
    api: &A,
    attr: &AttributeRef<'_>,
    tag: AttributeTypeTag,
) -> ShopResult<AttributeValue>
where
    A: ShopApi + ?Sized,
{
    debug!("Reading {} attribute {}", tag, attr);

    let value = match tag {
        AttributeTypeTag::Int => AttributeValue::Int(api.get_int_value(attr)?),
        AttributeTypeTag::IntArray => AttributeValue::IntArray(api.get_int_array(attr)?),
        AttributeTypeTag::Double => AttributeValue::Double(api.get_double_value(attr)?),
        AttributeTypeTag::DoubleArray => AttributeValue::DoubleArray(api.get_double_array(attr)?),
        AttributeTypeTag::String => AttributeValue::String(api.get_string_value(attr)?),
        AttributeTypeTag::StringArray => AttributeValue::StringArray(api.get_string_array(attr)?),
        AttributeTypeTag::Xy => {
            let x = api.get_xy_curve_x(attr)?;
            let y = api.get_xy_curve_y(attr)?;
            let reference = api.get_xy_curve_reference(attr)?;
            AttributeValue::Xy(Series::new(x, y)?.with_name(reference))
        }
        AttributeTypeTag::Sy => {
            let s = api.get_sy_curve_s(attr)?;
            let y = api.get_sy_curve_y(attr)?;
            AttributeValue::Sy(Series::new(s, y)?)
        }
        AttributeTypeTag::XyArray => {
            let references = api.get_xy_curve_array_references(attr)?;
            let n_points = api.get_xy_curve_array_n_points(attr)?;
            let x = api.get_xy_curve_array_x(attr)?;
            let y = api.get_xy_curve_array_y(attr)?;
            AttributeValue::XyArray(split_curve_array(&references, &n_points, &x, &y)?)
        }
        AttributeTypeTag::Txy => AttributeValue::Txy(read_txy_series(api, attr)?),
    };
    Ok(value)
}

fn read_txy_series<A>(api: &A, attr: &AttributeRef<'_>) -> ShopResult<TimeSeries>
where
    A: ShopApi + ?Sized,
{
    let unit: TimeUnit = api.get_time_unit()?.parse()?;
    let time_zone = api.get_time_zone()?;
    let start = get_shop_datetime(&api.get_txy_series_start_time(attr)?, &time_zone)?;
    let t = api.get_txy_series_t(attr)?;
    let y = api.get_txy_series_y(attr)?;
    if t.len() != y.len() {
        return Err(ShopError::lengths("t", t.len(), "y", y.len()));
    }

    let index = offsets_to_timestamps(unit, &start, &t)?;
    Series::new(index, y)
}

fn offsets_to_timestamps(
    unit: TimeUnit,
    start: &ShopDateTime,
    offsets: &[i64],
) -> ShopResult<Vec<ShopDateTime>> {
    offsets
        .iter()
        .map(|&offset| unit.offset_from(start, offset))
        .collect()
}

/// Convert `value` according to `tag` and send it to the engine.
pub fn set_attribute<A>(
    api: &mut A,
    attr: &AttributeRef<'_>,
    tag: AttributeTypeTag,
    value: &AttributeValue,
) -> ShopResult<()>
where
    A: ShopApi + ?Sized,
{
    debug!("Writing {} attribute {} from {} value", tag, attr, value.kind());

    match (tag, value) {
        (AttributeTypeTag::Int, AttributeValue::Int(v)) => api.set_int_value(attr, *v),
        (AttributeTypeTag::IntArray, AttributeValue::IntArray(v)) => api.set_int_array(attr, v),
        (AttributeTypeTag::Double, AttributeValue::Double(v)) => api.set_double_value(attr, *v),
        (AttributeTypeTag::DoubleArray, AttributeValue::DoubleArray(v)) => {
            api.set_double_array(attr, v)
        }
        (AttributeTypeTag::String, AttributeValue::String(v)) => api.set_string_value(attr, v),
        (AttributeTypeTag::StringArray, AttributeValue::StringArray(v)) => {
            api.set_string_array(attr, v)
        }
        (AttributeTypeTag::Xy, AttributeValue::Xy(curve)) => api.set_xy_curve(
            attr,
            curve.name().unwrap_or(0.0),
            curve.index(),
            curve.values(),
        ),
        (AttributeTypeTag::Sy, AttributeValue::Sy(curve)) => {
            api.set_sy_curve(attr, curve.index(), curve.values())
        }
        (AttributeTypeTag::XyArray, AttributeValue::XyArray(curves)) => {
            let flat = flatten_curve_array(curves);
            api.set_xy_curve_array(attr, &flat.references, &flat.n_points, &flat.x, &flat.y)
        }
        (AttributeTypeTag::Txy, AttributeValue::Txy(series)) => write_txy_series(api, attr, series),
        (AttributeTypeTag::Txy, AttributeValue::Double(constant)) => {
            write_txy_constant(api, attr, *constant)
        }
        (tag, value) => Err(ShopError::ValueMismatch {
            expected: tag,
            found: value.kind(),
        }),
    }
}

/// Resolve the engine's global start time in the engine's zone.
fn engine_start_time<A>(api: &A) -> ShopResult<ShopDateTime>
where
    A: ShopApi + ?Sized,
{
    let time_zone = api.get_time_zone()?;
    get_shop_datetime(&api.get_start_time()?, &time_zone)
}

fn write_txy_series<A>(api: &mut A, attr: &AttributeRef<'_>, series: &TimeSeries) -> ShopResult<()>
where
    A: ShopApi + ?Sized,
{
    let unit: TimeUnit = api.get_time_unit()?.parse()?;
    let start = engine_start_time(&*api)?;
    let offsets = series
        .index()
        .iter()
        .map(|t| unit.offsets_between(&start, t))
        .collect::<ShopResult<Vec<_>>>()?;

    api.set_txy_series(attr, &get_shop_timestring(&start), &offsets, series.values())
}

fn write_txy_constant<A>(api: &mut A, attr: &AttributeRef<'_>, constant: f64) -> ShopResult<()>
where
    A: ShopApi + ?Sized,
{
    let start = engine_start_time(&*api)?;
    let t = api.get_time_resolution_t()?;
    let y = vec![constant; t.len()];
    debug!(
        "Spreading constant {} over {} time resolution breakpoints",
        constant,
        t.len()
    );

    api.set_txy_series(attr, &get_shop_timestring(&start), &t, &y)
}

/// The engine's optimization horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResolution {
    pub start_time: ShopDateTime,
    pub end_time: ShopDateTime,
    pub time_unit: TimeUnit,
    /// Step length in effect from each breakpoint, keyed by breakpoint time.
    pub resolution: TimeSeries,
}

impl TimeResolution {
    /// Number of whole time units between start and end.
    pub fn horizon_units(&self) -> ShopResult<i64> {
        self.time_unit.offsets_between(&self.start_time, &self.end_time)
    }
}

/// Read the engine's global time resolution.
pub fn get_time_resolution<A>(api: &A) -> ShopResult<TimeResolution>
where
    A: ShopApi + ?Sized,
{
    let time_zone = api.get_time_zone()?;
    let start_time = get_shop_datetime(&api.get_start_time()?, &time_zone)?;
    let end_time = get_shop_datetime(&api.get_end_time()?, &time_zone)?;
    let time_unit: TimeUnit = api.get_time_unit()?.parse()?;

    let t = api.get_time_resolution_t()?;
    let y = api.get_time_resolution_y()?;
    if t.len() != y.len() {
        return Err(ShopError::lengths("t", t.len(), "y", y.len()));
    }
    let index = offsets_to_timestamps(time_unit, &start_time, &t)?;

    Ok(TimeResolution {
        start_time,
        end_time,
        time_unit,
        resolution: Series::new(index, y)?,
    })
}
