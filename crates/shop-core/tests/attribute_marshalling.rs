//! Integration tests for attribute marshalling.
//!
//! Runs every attribute kind through an in-memory engine loaded with the
//! same payloads a live engine would return.

use chrono::NaiveDate;
use shop_core::memory::{MemoryApi, StoredPayload, TimeState};
use shop_core::{
    get_attribute_value, get_shop_datetime, get_time_resolution, set_attribute, AttributeRef,
    AttributeTypeTag, AttributeValue, Series, ShopApi, ShopDateTime, ShopError, SyCurve,
    TimeSeries, TimeUnit, XyCurve,
};

const ATTR: AttributeRef<'static> = AttributeRef {
    object_type: "obj_type",
    object_name: "obj_name",
    attribute: "attr_name",
};

fn engine() -> MemoryApi {
    MemoryApi::new(TimeState {
        time_unit: "minute".into(),
        time_zone: String::new(),
        start_time: "202201010000".into(),
        end_time: "202201010300".into(),
        time_resolution_t: vec![0, 60],
        time_resolution_y: vec![15.0, 60.0],
    })
}

fn engine_with(payload: StoredPayload) -> MemoryApi {
    let mut api = engine();
    api.insert(&ATTR, payload);
    api
}

fn at(h: u32, m: u32) -> ShopDateTime {
    ShopDateTime::Naive(
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap(),
    )
}

#[test]
fn test_get_scalars_and_arrays_unchanged() {
    let cases = [
        (
            StoredPayload::Int { value: 11 },
            AttributeTypeTag::Int,
            AttributeValue::Int(11),
        ),
        (
            StoredPayload::IntArray { values: vec![11, 22] },
            AttributeTypeTag::IntArray,
            AttributeValue::IntArray(vec![11, 22]),
        ),
        (
            StoredPayload::Double { value: 1.1 },
            AttributeTypeTag::Double,
            AttributeValue::Double(1.1),
        ),
        (
            StoredPayload::DoubleArray { values: vec![1.1, 2.2] },
            AttributeTypeTag::DoubleArray,
            AttributeValue::DoubleArray(vec![1.1, 2.2]),
        ),
        (
            StoredPayload::String { value: "abc".into() },
            AttributeTypeTag::String,
            AttributeValue::String("abc".into()),
        ),
        (
            StoredPayload::StringArray {
                values: vec!["abc".into(), "def".into()],
            },
            AttributeTypeTag::StringArray,
            AttributeValue::StringArray(vec!["abc".into(), "def".into()]),
        ),
    ];

    for (payload, tag, expected) in cases {
        let api = engine_with(payload);
        assert_eq!(get_attribute_value(&api, &ATTR, tag).unwrap(), expected, "{tag}");
    }
}

#[test]
fn test_get_xy() {
    let api = engine_with(StoredPayload::XyCurve {
        reference: 0.0,
        x: vec![0.0, 1.0],
        y: vec![0.0, 1.1],
    });
    let curve = get_attribute_value(&api, &ATTR, AttributeTypeTag::Xy)
        .unwrap()
        .into_xy()
        .unwrap();
    assert_eq!(curve.index(), [0.0, 1.0]);
    assert_eq!(curve.values(), [0.0, 1.1]);
    assert_eq!(curve.name(), Some(0.0));
}

#[test]
fn test_get_sy() {
    let api = engine_with(StoredPayload::SyCurve {
        s: vec!["s1".into(), "s2".into()],
        y: vec![0.0, 1.1],
    });
    let value = get_attribute_value(&api, &ATTR, AttributeTypeTag::Sy).unwrap();
    let AttributeValue::Sy(curve) = value else {
        panic!("expected sy curve, got {value:?}");
    };
    assert_eq!(curve.index(), ["s1", "s2"]);
    assert_eq!(curve.values(), [0.0, 1.1]);
    assert_eq!(curve.name(), None);
}

#[test]
fn test_get_xy_array() {
    let api = engine_with(StoredPayload::XyCurveArray {
        references: vec![0.0, 10.0],
        n_points: vec![2, 3],
        x: vec![0.0, 1.0, 0.0, 1.0, 2.0],
        y: vec![0.0, 1.1, 0.0, 1.1, 2.2],
    });
    let value = get_attribute_value(&api, &ATTR, AttributeTypeTag::XyArray).unwrap();
    let AttributeValue::XyArray(curves) = value else {
        panic!("expected xy array, got {value:?}");
    };
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].index(), [0.0, 1.0]);
    assert_eq!(curves[0].values(), [0.0, 1.1]);
    assert_eq!(curves[0].name(), Some(0.0));
    assert_eq!(curves[1].index(), [0.0, 1.0, 2.0]);
    assert_eq!(curves[1].values(), [0.0, 1.1, 2.2]);
    assert_eq!(curves[1].name(), Some(10.0));
}

#[test]
fn test_get_txy_minutes() {
    let api = engine_with(StoredPayload::TxySeries {
        start_time: "202201010000".into(),
        t: vec![0, 15, 30, 45, 60, 120],
        y: vec![0.0, 1.1, 2.2, 3.3, 4.4, 5.5],
    });
    let series = get_attribute_value(&api, &ATTR, AttributeTypeTag::Txy)
        .unwrap()
        .into_txy()
        .unwrap();
    assert_eq!(
        series.index(),
        [at(0, 0), at(0, 15), at(0, 30), at(0, 45), at(1, 0), at(2, 0)]
    );
    assert_eq!(series.values(), [0.0, 1.1, 2.2, 3.3, 4.4, 5.5]);
}

#[test]
fn test_get_txy_hours_with_zone() {
    let mut api = engine_with(StoredPayload::TxySeries {
        start_time: "2022070100".into(),
        t: vec![0, 3],
        y: vec![1.0, 2.0],
    });
    api.time_mut().time_unit = "hour".into();
    api.time_mut().time_zone = "Europe/Oslo".into();

    let series = get_attribute_value(&api, &ATTR, AttributeTypeTag::Txy)
        .unwrap()
        .into_txy()
        .unwrap();
    let start = get_shop_datetime("2022070100", "Europe/Oslo").unwrap();
    assert_eq!(series.index()[0], start);
    assert_eq!(series.index()[1].to_string(), "2022-07-01 03:00:00+02:00");
}

#[test]
fn test_get_shape_mismatches() {
    let cases = [
        (
            StoredPayload::XyCurve {
                reference: 0.0,
                x: vec![0.0, 1.0],
                y: vec![0.0],
            },
            AttributeTypeTag::Xy,
        ),
        (
            StoredPayload::SyCurve {
                s: vec!["a".into()],
                y: vec![],
            },
            AttributeTypeTag::Sy,
        ),
        (
            StoredPayload::XyCurveArray {
                references: vec![0.0, 10.0],
                n_points: vec![2, 2],
                x: vec![0.0, 1.0, 2.0],
                y: vec![0.0, 1.0, 2.0],
            },
            AttributeTypeTag::XyArray,
        ),
        (
            StoredPayload::TxySeries {
                start_time: "202201010000".into(),
                t: vec![0, 15],
                y: vec![1.0],
            },
            AttributeTypeTag::Txy,
        ),
    ];

    for (payload, tag) in cases {
        let api = engine_with(payload);
        let err = get_attribute_value(&api, &ATTR, tag).unwrap_err();
        assert!(matches!(err, ShopError::ShapeMismatch(_)), "{tag}: {err}");
    }
}

#[test]
fn test_unknown_tag_name() {
    let err = "xyt".parse::<AttributeTypeTag>().unwrap_err();
    assert!(matches!(err, ShopError::UnsupportedType(_)));
}

#[test]
fn test_unknown_time_unit() {
    let mut api = engine_with(StoredPayload::TxySeries {
        start_time: "202201010000".into(),
        t: vec![0],
        y: vec![1.0],
    });
    api.time_mut().time_unit = "fortnight".into();
    assert!(matches!(
        get_attribute_value(&api, &ATTR, AttributeTypeTag::Txy),
        Err(ShopError::TimeUnit(_))
    ));
}

#[test]
fn test_set_xy() {
    let mut api = engine();
    let curve = XyCurve::new(vec![0.0, 1.0], vec![0.0, 1.1])
        .unwrap()
        .with_name(0.0);
    set_attribute(&mut api, &ATTR, AttributeTypeTag::Xy, &AttributeValue::Xy(curve.clone()))
        .unwrap();

    assert_eq!(
        api.payload(&ATTR),
        Some(&StoredPayload::XyCurve {
            reference: 0.0,
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.1],
        })
    );
    let back = get_attribute_value(&api, &ATTR, AttributeTypeTag::Xy).unwrap();
    assert_eq!(back, AttributeValue::Xy(curve));
}

#[test]
fn test_set_sy() {
    let mut api = engine();
    let curve = SyCurve::new(vec!["s1".into(), "s2".into()], vec![0.0, 1.1]).unwrap();
    set_attribute(&mut api, &ATTR, AttributeTypeTag::Sy, &AttributeValue::Sy(curve)).unwrap();

    assert_eq!(api.get_sy_curve_s(&ATTR).unwrap(), ["s1", "s2"]);
    assert_eq!(api.get_sy_curve_y(&ATTR).unwrap(), [0.0, 1.1]);
}

#[test]
fn test_set_xy_array() {
    let mut api = engine();
    let curves = vec![
        XyCurve::new(vec![0.0, 1.0], vec![0.0, 1.1])
            .unwrap()
            .with_name(0.0),
        XyCurve::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.1, 2.2])
            .unwrap()
            .with_name(10.0),
    ];
    let value = AttributeValue::XyArray(curves);
    set_attribute(&mut api, &ATTR, AttributeTypeTag::XyArray, &value).unwrap();

    assert_eq!(
        api.payload(&ATTR),
        Some(&StoredPayload::XyCurveArray {
            references: vec![0.0, 10.0],
            n_points: vec![2, 3],
            x: vec![0.0, 1.0, 0.0, 1.0, 2.0],
            y: vec![0.0, 1.1, 0.0, 1.1, 2.2],
        })
    );
    let back = get_attribute_value(&api, &ATTR, AttributeTypeTag::XyArray).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_set_txy() {
    let mut api = engine();
    let series = TimeSeries::new(
        vec![at(0, 0), at(0, 15), at(0, 30), at(0, 45), at(1, 0), at(2, 0)],
        vec![0.0, 1.1, 2.2, 3.3, 4.4, 5.5],
    )
    .unwrap();
    set_attribute(&mut api, &ATTR, AttributeTypeTag::Txy, &AttributeValue::Txy(series)).unwrap();

    let start = api.get_txy_series_start_time(&ATTR).unwrap();
    assert!(start.starts_with("202201010000"), "start time {start}");
    assert_eq!(api.get_txy_series_t(&ATTR).unwrap(), [0, 15, 30, 45, 60, 120]);
    assert_eq!(
        api.get_txy_series_y(&ATTR).unwrap(),
        [0.0, 1.1, 2.2, 3.3, 4.4, 5.5]
    );
}

#[test]
fn test_set_constant_txy() {
    let mut api = engine();
    set_attribute(&mut api, &ATTR, AttributeTypeTag::Txy, &AttributeValue::Double(1.1)).unwrap();

    let start = api.get_txy_series_start_time(&ATTR).unwrap();
    assert!(start.starts_with("202201010000"), "start time {start}");
    assert_eq!(api.get_txy_series_t(&ATTR).unwrap(), [0, 60]);
    let y = api.get_txy_series_y(&ATTR).unwrap();
    assert_eq!(y.len(), 2);
    assert!(y.iter().all(|v| (v - 1.1).abs() < 1e-15));
}

#[test]
fn test_set_txy_fractional_offset_sends_nothing() {
    let mut api = engine();
    let half_minute = ShopDateTime::Naive(
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 30)
            .unwrap(),
    );
    let series = TimeSeries::new(vec![at(0, 0), half_minute], vec![1.0, 2.0]).unwrap();
    let err = set_attribute(&mut api, &ATTR, AttributeTypeTag::Txy, &AttributeValue::Txy(series))
        .unwrap_err();

    assert!(matches!(err, ShopError::Precision(_)));
    assert_eq!(api.payload(&ATTR), None);
}

#[test]
fn test_set_txy_round_trip_with_zone() {
    let mut api = engine();
    api.time_mut().time_zone = "Europe/Oslo".into();
    api.time_mut().time_unit = "hour".into();
    api.time_mut().start_time = "2022103000".into();

    // Crosses the autumn DST change; offsets count absolute hours.
    let start = get_shop_datetime("2022103000", "Europe/Oslo").unwrap();
    let index: Vec<_> = (0..5)
        .map(|h| TimeUnit::Hour.offset_from(&start, h).unwrap())
        .collect();
    let series = Series::new(index, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let value = AttributeValue::Txy(series);
    set_attribute(&mut api, &ATTR, AttributeTypeTag::Txy, &value).unwrap();

    assert_eq!(api.get_txy_series_t(&ATTR).unwrap(), [0, 1, 2, 3, 4]);
    let back = get_attribute_value(&api, &ATTR, AttributeTypeTag::Txy).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_set_value_mismatch() {
    let mut api = engine();
    let err = set_attribute(
        &mut api,
        &ATTR,
        AttributeTypeTag::Xy,
        &AttributeValue::String("abc".into()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ShopError::ValueMismatch {
            expected: AttributeTypeTag::Xy,
            found: "string"
        }
    ));
    assert_eq!(api.payload(&ATTR), None);
}

#[test]
fn test_get_time_resolution() {
    let api = engine();
    let timeres = get_time_resolution(&api).unwrap();

    assert_eq!(timeres.start_time, at(0, 0));
    assert_eq!(timeres.end_time, at(3, 0));
    assert_eq!(timeres.time_unit, TimeUnit::Minute);
    assert_eq!(timeres.resolution.index(), [at(0, 0), at(1, 0)]);
    assert_eq!(timeres.resolution.values(), [15.0, 60.0]);
    assert_eq!(timeres.horizon_units().unwrap(), 180);
}

#[test]
fn test_time_resolution_shape_mismatch() {
    let mut api = engine();
    api.time_mut().time_resolution_y = vec![15.0];
    assert!(matches!(
        get_time_resolution(&api),
        Err(ShopError::ShapeMismatch(_))
    ));
}
