//! `rtldoc types`: show the active type classification tables.

use anyhow::Result;
use rtldoc_core::{TypeClass, TypeTables};

use crate::manifest::RtldocManifest;

/// Print each table, one class per line.
pub fn run(manifest: Option<&RtldocManifest>) -> Result<()> {
    let tables = manifest.map(RtldocManifest::type_tables).unwrap_or_default();
    print!("{}", describe(&tables));
    Ok(())
}

fn describe(tables: &TypeTables) -> String {
    let mut out = String::new();
    for class in TypeClass::ALL {
        out.push_str(&format!(
            "{:<13} {}\n",
            class.table_name(),
            tables.names(class).join(", ")
        ));
    }
    out
}
