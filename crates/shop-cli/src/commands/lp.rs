use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use shop_lp::{LpModel, VarInfo};
use tabwriter::TabWriter;
use tracing::info;

use super::load_snapshot;
use shop_cli::cli::OutputFormat;

pub fn vars(snapshot: &Path, var_type: Option<usize>, format: OutputFormat) -> Result<()> {
    let api = load_snapshot(snapshot)?;
    let model = LpModel::load(&api).context("loading LP model")?;
    if let Some(id) = var_type {
        model.var_type().get(id)?;
    }

    let vars = model.var();
    let ids = vars.filter(var_type, &[]);
    info!("Listing {} of {} variables", ids.len(), vars.n_vars());

    match format {
        OutputFormat::Table => {
            let mut writer = TabWriter::new(io::stdout()).padding(2);
            writeln!(writer, "ID\tTYPE\tVARIABLE\tCC\tBIN")?;
            for id in ids {
                let var = vars.get(id)?;
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}",
                    id,
                    var.type_name(),
                    var.format(),
                    var.cc(),
                    u8::from(var.bin())
                )?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let infos = ids
                .into_iter()
                .map(|id| vars.get(id)?.info())
                .collect::<Result<Vec<VarInfo>, _>>()?;
            serde_json::to_writer_pretty(io::stdout(), &infos)
                .map_err(|err| anyhow::anyhow!("serializing variables to JSON: {err}"))?;
            println!();
        }
    }
    Ok(())
}
