//! Preview URL command handler. Never touches the network.

use anyhow::Result;
use aora_core::{Aora, FileKind};

pub fn run(aora: &Aora, file_id: &str, kind: &str) -> Result<()> {
    let kind: FileKind = kind.parse()?;
    let url = aora.get_file_preview(file_id, kind)?;
    println!("{url}");
    Ok(())
}
