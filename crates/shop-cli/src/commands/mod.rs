pub mod attr;
pub mod lp;
pub mod time;
pub mod timeres;

use std::path::Path;

use anyhow::{Context, Result};
use shop_core::memory::MemoryApi;

pub(crate) fn load_snapshot(path: &Path) -> Result<MemoryApi> {
    MemoryApi::load_from(path).with_context(|| format!("loading snapshot {}", path.display()))
}
