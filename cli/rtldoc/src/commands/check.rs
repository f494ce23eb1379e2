//! `rtldoc check`: normalize a parse dump and report, without rendering.

use std::path::Path;

use anyhow::{bail, Result};
use rtldoc_core::NormalizationReport;

use crate::commands::{load_design, print_report, require_vhdl, system_name};
use crate::manifest::RtldocManifest;

/// Run normalization only. Fails if any declaration could not be normalized.
pub fn run(
    input: &Path,
    source: Option<&str>,
    manifest: Option<&RtldocManifest>,
) -> Result<NormalizationReport> {
    require_vhdl(source)?;
    let tables = manifest.map(RtldocManifest::type_tables).unwrap_or_default();
    let aggregation = load_design(input, &system_name(input, source), &tables)?;

    for entity in aggregation.system.entities() {
        println!(
            "{:<24} {:>3} generics {:>3} ports",
            entity.name(),
            entity.generics().len(),
            entity.ports().len()
        );
    }
    print_report(&aggregation.report);

    if aggregation.report.has_failures() {
        bail!("normalization failed");
    }
    Ok(aggregation.report)
}
