//! Conversion between engine time strings and calendar timestamps.
//!
//! The engine exchanges timestamps as numeric strings in `YYYYMMDDHHMMSS`
//! layout. Shorter strings carry less precision: `"2022010112"` names the
//! hour 12:00 on 2022-01-01. Decoding infers the parse format from the length
//! of the string; encoding always emits full precision.
//!
//! ```
//! use shop_core::time::{get_shop_datetime, get_shop_timestring};
//!
//! let ts = get_shop_datetime("202201011530", "").unwrap();
//! assert_eq!(get_shop_timestring(&ts), "20220101153000");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ShopError, ShopResult};

/// Full-precision engine time format.
pub const SHOP_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Number of digits in a full-precision engine time string.
pub const SHOP_TIME_DIGITS: usize = 14;

/// Shortest accepted engine time string (`YYYYMMDD`).
pub const SHOP_TIME_MIN_DIGITS: usize = 8;

/// A calendar timestamp, either naive or attached to a named time zone.
///
/// The engine reports an empty zone name when the model is zone-less, in
/// which case timestamps stay naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopDateTime {
    Naive(NaiveDateTime),
    Zoned(DateTime<Tz>),
}

impl ShopDateTime {
    /// Wall-clock time, in the attached zone if any.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            ShopDateTime::Naive(naive) => *naive,
            ShopDateTime::Zoned(dt) => dt.naive_local(),
        }
    }

    /// The attached zone, `None` for naive timestamps.
    pub fn time_zone(&self) -> Option<Tz> {
        match self {
            ShopDateTime::Naive(_) => None,
            ShopDateTime::Zoned(dt) => Some(dt.timezone()),
        }
    }

    /// Add a signed duration. Zoned timestamps move in absolute time.
    pub fn checked_add(&self, delta: TimeDelta) -> ShopResult<Self> {
        let shifted = match self {
            ShopDateTime::Naive(naive) => naive.checked_add_signed(delta).map(ShopDateTime::Naive),
            ShopDateTime::Zoned(dt) => dt.checked_add_signed(delta).map(ShopDateTime::Zoned),
        };
        shifted.ok_or_else(|| ShopError::Format(format!("{self} + {delta} is out of range")))
    }

    /// Signed distance `self - earlier`.
    ///
    /// Both timestamps must be of the same kind; mixing naive and zoned
    /// timestamps has no defined meaning.
    pub fn signed_duration_since(&self, earlier: &ShopDateTime) -> ShopResult<TimeDelta> {
        match (self, earlier) {
            (ShopDateTime::Naive(a), ShopDateTime::Naive(b)) => Ok(a.signed_duration_since(*b)),
            (ShopDateTime::Zoned(a), ShopDateTime::Zoned(b)) => Ok(a.signed_duration_since(*b)),
            _ => Err(ShopError::Format(format!(
                "cannot compare naive and zoned timestamps ({self} vs {earlier})"
            ))),
        }
    }
}

impl From<NaiveDateTime> for ShopDateTime {
    fn from(naive: NaiveDateTime) -> Self {
        ShopDateTime::Naive(naive)
    }
}

impl From<DateTime<Tz>> for ShopDateTime {
    fn from(dt: DateTime<Tz>) -> Self {
        ShopDateTime::Zoned(dt)
    }
}

impl fmt::Display for ShopDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopDateTime::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%d %H:%M:%S")),
            ShopDateTime::Zoned(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%:z")),
        }
    }
}

// Serialized in display form, e.g. for JSON output of time series.
impl Serialize for ShopDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Format a timestamp the way the engine expects it (`YYYYMMDDHHMMSS`).
pub fn get_shop_timestring(timestamp: &ShopDateTime) -> String {
    timestamp.naive_local().format(SHOP_TIME_FORMAT).to_string()
}

/// Parse an engine time string, attaching `time_zone_name` unless it is empty.
///
/// Strings longer than 14 characters are truncated. The parse format is the
/// prefix of `%Y%m%d%H%M%S` that matches the number of digits supplied, so
/// `"20220101"` parses as a date at midnight. A format length landing inside
/// a field is shortened by one, which makes odd-length inputs fail on the
/// trailing digit.
pub fn get_shop_datetime(time_string: &str, time_zone_name: &str) -> ShopResult<ShopDateTime> {
    let time_string = match time_string.char_indices().nth(SHOP_TIME_DIGITS) {
        Some((cut, _)) => &time_string[..cut],
        None => time_string,
    };
    let len = time_string.chars().count();
    if len < SHOP_TIME_MIN_DIGITS {
        return Err(ShopError::Format(format!(
            "time string '{time_string}' has {len} digits, at least {SHOP_TIME_MIN_DIGITS} are required"
        )));
    }

    let missing_digits = SHOP_TIME_DIGITS - len;
    let mut format_len = SHOP_TIME_FORMAT.len() - missing_digits;
    if format_len % 2 == 1 {
        format_len -= 1;
    }
    let format = &SHOP_TIME_FORMAT[..format_len];

    let naive = parse_with_prefix_format(time_string, format)?;
    localize(naive, time_zone_name)
}

fn parse_with_prefix_format(time_string: &str, format: &str) -> ShopResult<NaiveDateTime> {
    let malformed =
        |e: chrono::ParseError| ShopError::Format(format!("cannot parse '{time_string}' as '{format}': {e}"));

    let mut parsed = Parsed::new();
    parse(&mut parsed, time_string, StrftimeItems::new(format)).map_err(malformed)?;

    // Fields beyond the supplied precision start at zero.
    if !format.contains("%H") {
        parsed.set_hour(0).map_err(malformed)?;
    }
    if !format.contains("%M") {
        parsed.set_minute(0).map_err(malformed)?;
    }
    if !format.contains("%S") {
        parsed.set_second(0).map_err(malformed)?;
    }
    parsed.to_naive_datetime_with_offset(0).map_err(malformed)
}

/// Attach a named zone to a wall-clock time. Empty names keep it naive.
pub fn localize(naive: NaiveDateTime, time_zone_name: &str) -> ShopResult<ShopDateTime> {
    if time_zone_name.is_empty() {
        return Ok(ShopDateTime::Naive(naive));
    }
    let tz = parse_time_zone(time_zone_name)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(ShopDateTime::Zoned(dt)),
        LocalResult::Ambiguous(earliest, _) => Ok(ShopDateTime::Zoned(earliest)),
        LocalResult::None => Err(ShopError::Format(format!(
            "{naive} does not exist in time zone {time_zone_name}"
        ))),
    }
}

/// Resolve an IANA zone name such as `Europe/Oslo`.
pub fn parse_time_zone(name: &str) -> ShopResult<Tz> {
    name.parse::<Tz>().map_err(|_| ShopError::TimeZone(name.to_string()))
}

/// Engine time unit, the step of txy offsets and time resolution breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// Length of one unit in whole seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3600,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds())
    }

    /// The name the engine uses for this unit.
    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
        }
    }

    /// `start + offset * unit`.
    pub fn offset_from(&self, start: &ShopDateTime, offset: i64) -> ShopResult<ShopDateTime> {
        let delta = offset
            .checked_mul(self.seconds())
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| ShopError::Format(format!("offset {offset} {self}s is out of range")))?;
        start.checked_add(delta)
    }

    /// Whole number of units from `start` to `t`.
    ///
    /// Fails with [`ShopError::Precision`] when the gap is not an exact
    /// multiple of the unit.
    pub fn offsets_between(&self, start: &ShopDateTime, t: &ShopDateTime) -> ShopResult<i64> {
        let delta = t.signed_duration_since(start)?;
        let seconds = delta.num_seconds();
        if delta.subsec_nanos() != 0 || seconds % self.seconds() != 0 {
            return Err(ShopError::Precision(format!(
                "{t} is not a whole number of {self}s after {start}"
            )));
        }
        Ok(seconds / self.seconds())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "second" | "seconds" => Ok(TimeUnit::Second),
            "minute" | "minutes" => Ok(TimeUnit::Minute),
            "hour" | "hours" => Ok(TimeUnit::Hour),
            _ => Err(ShopError::TimeUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_encode_full_precision() {
        let ts = ShopDateTime::Naive(naive(2022, 3, 4, 5, 6, 7));
        assert_eq!(get_shop_timestring(&ts), "20220304050607");
    }

    #[test]
    fn test_decode_each_precision() {
        let cases = [
            ("20220101", naive(2022, 1, 1, 0, 0, 0)),
            ("2022010113", naive(2022, 1, 1, 13, 0, 0)),
            ("202201011315", naive(2022, 1, 1, 13, 15, 0)),
            ("20220101131545", naive(2022, 1, 1, 13, 15, 45)),
        ];
        for (input, expected) in cases {
            let ts = get_shop_datetime(input, "").unwrap();
            assert_eq!(ts, ShopDateTime::Naive(expected), "input {input}");
        }
    }

    #[test]
    fn test_decode_truncates_long_input() {
        let ts = get_shop_datetime("2022010113154599", "").unwrap();
        assert_eq!(ts, ShopDateTime::Naive(naive(2022, 1, 1, 13, 15, 45)));
    }

    #[test]
    fn test_decode_too_short_is_format_error() {
        for input in ["", "2022", "202201", "2022011"] {
            let err = get_shop_datetime(input, "").unwrap_err();
            assert!(matches!(err, ShopError::Format(_)), "input {input:?}");
        }
    }

    #[test]
    fn test_decode_odd_length_fails() {
        for input in ["202201011", "2022010113151"] {
            assert!(matches!(
                get_shop_datetime(input, ""),
                Err(ShopError::Format(_))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_invalid_fields() {
        assert!(matches!(
            get_shop_datetime("20221301", ""),
            Err(ShopError::Format(_))
        ));
        assert!(matches!(
            get_shop_datetime("2022abcd", ""),
            Err(ShopError::Format(_))
        ));
    }

    #[test]
    fn test_decode_with_zone() {
        let ts = get_shop_datetime("202207011200", "Europe/Oslo").unwrap();
        assert_eq!(ts.time_zone(), Some(chrono_tz::Europe::Oslo));
        assert_eq!(ts.naive_local(), naive(2022, 7, 1, 12, 0, 0));
        assert_eq!(ts.to_string(), "2022-07-01 12:00:00+02:00");
    }

    #[test]
    fn test_unknown_zone() {
        let err = get_shop_datetime("20220101", "Mars/Olympus").unwrap_err();
        assert!(matches!(err, ShopError::TimeZone(ref z) if z == "Mars/Olympus"));
    }

    #[test]
    fn test_dst_gap_and_overlap() {
        // Clocks jump from 02:00 to 03:00 on 2022-03-27 in Oslo.
        assert!(matches!(
            get_shop_datetime("202203270230", "Europe/Oslo"),
            Err(ShopError::Format(_))
        ));
        // 02:30 happens twice on 2022-10-30; the earlier one wins.
        let ts = get_shop_datetime("202210300230", "Europe/Oslo").unwrap();
        assert_eq!(ts.to_string(), "2022-10-30 02:30:00+02:00");
    }

    #[test]
    fn test_round_trip() {
        for zone in ["", "Europe/Oslo", "UTC"] {
            let ts = localize(naive(2021, 12, 31, 23, 59, 58), zone).unwrap();
            let back = get_shop_datetime(&get_shop_timestring(&ts), zone).unwrap();
            assert_eq!(back, ts, "zone {zone:?}");
        }
    }

    #[test]
    fn test_time_unit_parsing() {
        assert_eq!("minute".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert_eq!("HOUR".parse::<TimeUnit>().unwrap(), TimeUnit::Hour);
        assert_eq!("seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Second);
        assert!(matches!(
            "fortnight".parse::<TimeUnit>(),
            Err(ShopError::TimeUnit(_))
        ));
    }

    #[test]
    fn test_offsets_between() {
        let start = ShopDateTime::Naive(naive(2022, 1, 1, 0, 0, 0));
        let t = ShopDateTime::Naive(naive(2022, 1, 1, 2, 0, 0));
        assert_eq!(TimeUnit::Minute.offsets_between(&start, &t).unwrap(), 120);
        assert_eq!(TimeUnit::Hour.offsets_between(&start, &t).unwrap(), 2);
        assert_eq!(TimeUnit::Hour.offsets_between(&t, &start).unwrap(), -2);

        let odd = ShopDateTime::Naive(naive(2022, 1, 1, 0, 7, 30));
        assert!(matches!(
            TimeUnit::Minute.offsets_between(&start, &odd),
            Err(ShopError::Precision(_))
        ));
        assert_eq!(TimeUnit::Second.offsets_between(&start, &odd).unwrap(), 450);
    }

    #[test]
    fn test_mixed_kinds_are_rejected() {
        let naive_start = ShopDateTime::Naive(naive(2022, 1, 1, 0, 0, 0));
        let zoned = localize(naive(2022, 1, 1, 1, 0, 0), "UTC").unwrap();
        assert!(matches!(
            TimeUnit::Hour.offsets_between(&naive_start, &zoned),
            Err(ShopError::Format(_))
        ));
    }

    #[test]
    fn test_offset_from() {
        let start = get_shop_datetime("202201010000", "").unwrap();
        let t = TimeUnit::Minute.offset_from(&start, 45).unwrap();
        assert_eq!(t.naive_local(), naive(2022, 1, 1, 0, 45, 0));
        assert!(TimeUnit::Hour.offset_from(&start, i64::MAX).is_err());
    }
}
