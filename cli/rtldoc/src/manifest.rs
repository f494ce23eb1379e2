//! `rtldoc.toml` parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtldoc_core::TypeTables;
use serde::{Deserialize, Serialize};

/// Name of the configuration file searched for upward from the working directory.
pub const MANIFEST_NAME: &str = "rtldoc.toml";

/// The top-level configuration of a documentation project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RtldocManifest {
    /// Document defaults.
    #[serde(default)]
    pub document: Option<DocumentConfig>,
    /// Type classification overrides.
    #[serde(default)]
    pub types: Option<TypeTables>,
}

/// Document section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Title placed in the document front matter.
    #[serde(default)]
    pub title: Option<String>,
    /// Default output format (markdown, text, json).
    #[serde(default)]
    pub format: Option<String>,
}

impl RtldocManifest {
    /// Search upward from `start_dir` for an `rtldoc.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse and validate a manifest from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        let manifest: RtldocManifest = toml::from_str(s)?;
        if let Some(types) = &manifest.types {
            types.validate()?;
        }
        Ok(manifest)
    }

    /// The type tables to classify with: the manifest's or the defaults.
    pub fn type_tables(&self) -> TypeTables {
        self.types.clone().unwrap_or_default()
    }

    pub fn default_title(&self) -> Option<&str> {
        self.document.as_ref().and_then(|d| d.title.as_deref())
    }

    pub fn default_format(&self) -> Option<&str> {
        self.document.as_ref().and_then(|d| d.format.as_deref())
    }
}
