use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use shop_core::{get_time_resolution, ShopDateTime, TimeSeries, TimeUnit};
use tabwriter::TabWriter;

use super::load_snapshot;
use shop_cli::cli::OutputFormat;

#[derive(Serialize)]
struct TimeResolutionReport<'a> {
    start_time: &'a ShopDateTime,
    end_time: &'a ShopDateTime,
    time_unit: TimeUnit,
    horizon_units: Option<i64>,
    resolution: &'a TimeSeries,
}

pub fn show(snapshot: &Path, format: OutputFormat, decimals: usize) -> Result<()> {
    let api = load_snapshot(snapshot)?;
    let res = get_time_resolution(&api).context("reading time resolution")?;
    // A horizon that is not a whole number of units is still worth printing.
    let horizon_units = res.horizon_units().ok();

    match format {
        OutputFormat::Json => {
            let report = TimeResolutionReport {
                start_time: &res.start_time,
                end_time: &res.end_time,
                time_unit: res.time_unit,
                horizon_units,
                resolution: &res.resolution,
            };
            serde_json::to_writer_pretty(io::stdout(), &report)
                .map_err(|err| anyhow::anyhow!("serializing time resolution to JSON: {err}"))?;
            println!();
        }
        OutputFormat::Table => {
            let mut writer = TabWriter::new(io::stdout()).padding(2);
            writeln!(writer, "START\t{}", res.start_time)?;
            writeln!(writer, "END\t{}", res.end_time)?;
            writeln!(writer, "UNIT\t{}", res.time_unit)?;
            if let Some(units) = horizon_units {
                writeln!(writer, "HORIZON\t{units}")?;
            }
            writeln!(writer)?;
            writeln!(writer, "FROM\tSTEP")?;
            for (from, step) in res.resolution.iter() {
                writeln!(writer, "{from}\t{step:.decimals$}")?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
