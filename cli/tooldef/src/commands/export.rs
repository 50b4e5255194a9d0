//! Default mode — write grouped flags to `<Toolchain>_flags.txt`.

use anyhow::{Context, Result};
use tooldef_core::{write_flags, ExportSummary, Property};

use crate::config::Settings;

/// Group, render and write `properties` per `settings`.
pub fn run(properties: &[Property], settings: &Settings) -> Result<ExportSummary> {
    let summary = write_flags(
        &settings.output_dir,
        properties,
        &settings.selection,
        &settings.layout,
    )
    .with_context(|| format!("writing flags to {}", settings.output_dir.display()))?;
    println!("{}", summary_line(&summary));
    Ok(summary)
}

fn summary_line(summary: &ExportSummary) -> String {
    format!(
        "Wrote {} entries to {}",
        summary.entries,
        summary.path.display()
    )
}
