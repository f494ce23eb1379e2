//! `rtldoc doc`: normalize a parse dump and write the interface document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rtldoc_render::{renderer_for, DocFormat, RenderContext};

use crate::commands::{load_design, print_report, require_vhdl, system_name};
use crate::manifest::RtldocManifest;

/// Flags of `rtldoc doc`.
#[derive(Debug)]
pub struct DocOptions<'a> {
    pub input: &'a Path,
    pub source: Option<&'a str>,
    pub format: Option<&'a str>,
    pub output: Option<&'a str>,
    pub title: Option<&'a str>,
    pub strict: bool,
    pub stdout: bool,
}

impl<'a> DocOptions<'a> {
    pub fn new(input: &'a Path) -> Self {
        Self {
            input,
            source: None,
            format: None,
            output: None,
            title: None,
            strict: false,
            stdout: false,
        }
    }
}

/// Generate the document. Returns the path written, or `None` with `--stdout`.
pub fn run(opts: &DocOptions<'_>, manifest: Option<&RtldocManifest>) -> Result<Option<PathBuf>> {
    require_vhdl(opts.source)?;

    let tables = manifest.map(RtldocManifest::type_tables).unwrap_or_default();
    let format_name = opts
        .format
        .or_else(|| manifest.and_then(RtldocManifest::default_format))
        .unwrap_or("markdown");
    let format = DocFormat::parse(format_name)?;

    let name = system_name(opts.input, opts.source);
    let aggregation = load_design(opts.input, &name, &tables)?;
    print_report(&aggregation.report);

    let title = opts
        .title
        .or_else(|| manifest.and_then(RtldocManifest::default_title))
        .unwrap_or(name.as_str());
    let mut ctx = RenderContext::new(title);
    if let Some(source) = opts.source {
        ctx = ctx.with_source(source);
    }

    let output = renderer_for(format).render(&aggregation.system, &ctx)?;

    let written = if opts.stdout {
        print!("{}", output.text);
        None
    } else {
        let path = match opts.output {
            Some(path) => PathBuf::from(path),
            None => default_output(opts.input, &name, format),
        };
        fs::write(&path, &output.text).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("wrote {}", path.display());
        Some(path)
    };

    if opts.strict && aggregation.report.has_failures() {
        bail!(
            "{} declaration(s) could not be normalized",
            aggregation.report.failures().count()
        );
    }
    Ok(written)
}

/// `<dir of input>/<system name>.<ext>`, or `<system name>.rtldoc.<ext>`
/// when that would overwrite the input.
fn default_output(input: &Path, name: &str, format: DocFormat) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let path = dir.join(format!("{name}.{}", format.extension()));
    if path == input {
        dir.join(format!("{name}.rtldoc.{}", format.extension()))
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_dump(dir: &Path) -> PathBuf {
        let dump = json!({"entities": [{
            "name": "blinky",
            "generics": [{
                "name": "INIT",
                "type": {"literal": {"type": "ID", "value": "std_logic_vector"}},
                "value": {"literal": {"type": "INT", "value": 15, "bits": 8}},
            }],
            "ports": [
                {"direction": "IN", "variable": {
                    "name": "clk", "type": {"literal": {"value": "std_logic"}}, "value": null}},
                {"direction": "OUT", "variable": {
                    "name": "led", "type": {"binOperator": {
                        "op0": {"literal": {"value": "std_logic_vector"}},
                        "op1": {"literal": {"value": "led_range"}},
                    }}, "value": null}},
            ],
        }]});
        let path = dir.join("blinky.json");
        fs::write(&path, dump.to_string()).unwrap();
        path
    }

    #[test]
    fn writes_markdown_next_to_source_stem() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dump(dir.path());
        let opts = DocOptions {
            source: Some("rtl/top.vhd"),
            ..DocOptions::new(&input)
        };

        let written = run(&opts, None).unwrap().unwrap();
        assert_eq!(written, dir.path().join("top.md"));

        let doc = fs::read_to_string(written).unwrap();
        assert!(doc.contains("title: \"top\""));
        assert!(doc.contains("# blinky component overview"));
        assert!(doc.contains("|INIT|std_logic_vector|7:0|0x0F|"));
        assert!(doc.contains("|clk|in|std_logic|||"));
        // The malformed port is reported, not rendered.
        assert!(!doc.contains("|led|"));
    }

    #[test]
    fn strict_fails_after_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dump(dir.path());
        let output = dir.path().join("out.txt");
        let output_str = output.to_str().unwrap();
        let opts = DocOptions {
            format: Some("text"),
            output: Some(output_str),
            strict: true,
            ..DocOptions::new(&input)
        };

        let err = run(&opts, None).unwrap_err();
        assert!(err.to_string().contains("1 declaration(s)"));
        assert!(fs::read_to_string(&output).unwrap().contains("--- blinky ---"));
    }

    #[test]
    fn manifest_supplies_title_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dump(dir.path());
        let manifest =
            RtldocManifest::parse("[document]\ntitle = \"Board\"\nformat = \"json\"\n").unwrap();
        let opts = DocOptions::new(&input);

        let written = run(&opts, Some(&manifest)).unwrap().unwrap();
        assert_eq!(written, dir.path().join("blinky.rtldoc.json"));
        let data: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(data["title"], "Board");
        assert_eq!(data["system"]["name"], "blinky");
    }

    #[test]
    fn verilog_source_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dump(dir.path());
        let opts = DocOptions {
            source: Some("core.v"),
            ..DocOptions::new(&input)
        };
        assert!(run(&opts, None).is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dump(dir.path());
        let opts = DocOptions {
            format: Some("pdf"),
            ..DocOptions::new(&input)
        };
        assert!(run(&opts, None).is_err());
    }
}
