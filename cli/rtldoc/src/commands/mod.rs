//! CLI command implementations.

pub mod check;
pub mod doc;
pub mod types;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rtldoc_core::{aggregate_json, Aggregation, NormalizationReport, TypeTables};

/// HDL dialect of the documented source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdlLanguage {
    Vhdl,
    Verilog,
}

impl HdlLanguage {
    /// Detect the dialect from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("vhd") | Some("vhdl") => Ok(HdlLanguage::Vhdl),
            Some("v") | Some("sv") => Ok(HdlLanguage::Verilog),
            _ => bail!(
                "cannot tell the HDL of '{}': expected a .vhd, .vhdl, .v or .sv file",
                path.display()
            ),
        }
    }
}

/// Fail unless the source file (when given) is VHDL.
pub fn require_vhdl(source: Option<&str>) -> Result<()> {
    let Some(source) = source else {
        return Ok(());
    };
    match HdlLanguage::from_path(Path::new(source))? {
        HdlLanguage::Vhdl => Ok(()),
        HdlLanguage::Verilog => bail!("Verilog documentation generation not implemented"),
    }
}

/// Name the system after the source file, or the parse dump when no source
/// is given.
pub fn system_name(input: &Path, source: Option<&str>) -> String {
    let path = source.map(Path::new).unwrap_or(input);
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("design")
        .to_string()
}

/// Read a parse dump and aggregate it into a system.
pub fn load_design(input: &Path, system_name: &str, tables: &TypeTables) -> Result<Aggregation> {
    let content =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let dump: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", input.display()))?;
    let aggregation = aggregate_json(system_name, &dump, tables)?;
    Ok(aggregation)
}

/// Print every issue and the summary line to stderr.
pub fn print_report(report: &NormalizationReport) {
    for issue in report.issues() {
        eprintln!("{issue}");
    }
    eprintln!("{}", report.summary());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension() {
        assert_eq!(HdlLanguage::from_path(Path::new("a.vhd")).unwrap(), HdlLanguage::Vhdl);
        assert_eq!(HdlLanguage::from_path(Path::new("a.VHDL")).unwrap(), HdlLanguage::Vhdl);
        assert_eq!(HdlLanguage::from_path(Path::new("a.v")).unwrap(), HdlLanguage::Verilog);
        assert!(HdlLanguage::from_path(Path::new("a.txt")).is_err());
        assert!(HdlLanguage::from_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn verilog_is_not_implemented() {
        let err = require_vhdl(Some("core.v")).unwrap_err();
        assert!(err.to_string().contains("not implemented"));
        assert!(require_vhdl(Some("core.vhd")).is_ok());
        assert!(require_vhdl(None).is_ok());
    }

    #[test]
    fn system_name_prefers_source() {
        assert_eq!(system_name(Path::new("out/dump.json"), Some("rtl/fifo.vhd")), "fifo");
        assert_eq!(system_name(Path::new("out/dump.json"), None), "dump");
        assert_eq!(system_name(Path::new("/"), None), "design");
    }
}
