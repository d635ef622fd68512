use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use shop_core::{get_shop_datetime, get_shop_timestring, ShopDateTime, ShopError};
use tracing::debug;

use shop_cli::config::ShopConfig;

/// Layouts accepted by `time encode` besides RFC 3339.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

pub fn decode(time_string: &str, tz: Option<&str>, config: &ShopConfig) -> Result<()> {
    let tz = tz.unwrap_or(&config.time.default_time_zone);
    debug!("Decoding {time_string:?} in zone {tz:?}");
    let timestamp = get_shop_datetime(time_string, tz)
        .with_context(|| format!("decoding time string {time_string:?}"))?;
    println!("{timestamp}");
    Ok(())
}

pub fn encode(timestamp: &str) -> Result<()> {
    let parsed = parse_timestamp(timestamp)
        .with_context(|| format!("encoding timestamp {timestamp:?}"))?;
    println!("{}", get_shop_timestring(&parsed));
    Ok(())
}

/// Parse a user-supplied timestamp. RFC 3339 input keeps its wall-clock
/// time, since engine strings carry no offset.
pub(crate) fn parse_timestamp(input: &str) -> Result<ShopDateTime, ShopError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(ShopDateTime::Naive(dt.naive_local()));
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(ShopDateTime::Naive)
        .ok_or_else(|| ShopError::Format(format!("unrecognised timestamp {input:?}")))
}
