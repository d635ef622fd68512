use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use shop_core::{get_attribute_value, AttributeRef, AttributeTypeTag, AttributeValue, Series};
use tabwriter::TabWriter;
use tracing::info;

use super::load_snapshot;
use shop_cli::cli::OutputFormat;

pub struct GetArgs<'a> {
    pub snapshot: &'a Path,
    pub object_type: &'a str,
    pub object_name: &'a str,
    pub attr: &'a str,
    pub kind: &'a str,
}

pub fn get(args: GetArgs<'_>, format: OutputFormat, decimals: usize) -> Result<()> {
    let api = load_snapshot(args.snapshot)?;
    let tag: AttributeTypeTag = args.kind.parse()?;
    let attr = AttributeRef::new(args.object_type, args.object_name, args.attr);
    info!("Reading {attr} as {tag}");

    let value =
        get_attribute_value(&api, &attr, tag).with_context(|| format!("reading {attr}"))?;
    match format {
        OutputFormat::Table => {
            let table = render_value(&value, decimals)?;
            print!("{table}");
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &value)
                .map_err(|err| anyhow::anyhow!("serializing {attr} to JSON: {err}"))?;
            println!();
        }
    }
    Ok(())
}

/// Render a value as an aligned table.
pub(crate) fn render_value(value: &AttributeValue, decimals: usize) -> Result<String> {
    let mut writer = TabWriter::new(Vec::new()).padding(2);
    match value {
        AttributeValue::Int(v) => writeln!(writer, "{v}")?,
        AttributeValue::Double(v) => writeln!(writer, "{v:.decimals$}")?,
        AttributeValue::String(v) => writeln!(writer, "{v}")?,
        AttributeValue::IntArray(values) => {
            writeln!(writer, "INDEX\tVALUE")?;
            for (i, v) in values.iter().enumerate() {
                writeln!(writer, "{i}\t{v}")?;
            }
        }
        AttributeValue::DoubleArray(values) => {
            writeln!(writer, "INDEX\tVALUE")?;
            for (i, v) in values.iter().enumerate() {
                writeln!(writer, "{i}\t{v:.decimals$}")?;
            }
        }
        AttributeValue::StringArray(values) => {
            writeln!(writer, "INDEX\tVALUE")?;
            for (i, v) in values.iter().enumerate() {
                writeln!(writer, "{i}\t{v}")?;
            }
        }
        AttributeValue::Xy(curve) => {
            if let Some(reference) = curve.name() {
                writeln!(writer, "REFERENCE\t{reference}")?;
            }
            write_series(&mut writer, "X", curve, decimals)?;
        }
        AttributeValue::Sy(curve) => write_series(&mut writer, "S", curve, decimals)?,
        AttributeValue::XyArray(curves) => {
            writeln!(writer, "REFERENCE\tX\tY")?;
            for curve in curves {
                let reference = curve.name().unwrap_or_default();
                for (x, y) in curve.iter() {
                    writeln!(writer, "{reference}\t{x}\t{y:.decimals$}")?;
                }
            }
        }
        AttributeValue::Txy(series) => write_series(&mut writer, "TIME", series, decimals)?,
    }
    writer.flush()?;
    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn write_series<K: Display>(
    writer: &mut impl Write,
    key_header: &str,
    series: &Series<K>,
    decimals: usize,
) -> io::Result<()> {
    writeln!(writer, "{key_header}\tY")?;
    for (key, value) in series.iter() {
        writeln!(writer, "{key}\t{value:.decimals$}")?;
    }
    Ok(())
}
