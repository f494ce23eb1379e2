//! Markdown renderer: the document handed to pandoc for PDF/ODT export.

use rtldoc_core::{Entity, System};

use crate::error::Result;
use crate::format::{generic_row, port_row, GENERIC_COLUMNS, PORT_COLUMNS};
use crate::renderer::{DocFormat, RenderContext, RenderOutput, Renderer};

/// Renders one `# <entity> component overview` section per entity.
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> DocFormat {
        DocFormat::Markdown
    }

    fn render(&self, system: &System, ctx: &RenderContext) -> Result<RenderOutput> {
        let mut doc = String::new();
        doc.push_str("---\n");
        doc.push_str(&format!("title: \"{}\"\n", ctx.title.replace('"', "\\\"")));
        doc.push_str("---\n\n");

        if let Some(source) = &ctx.source {
            doc.push_str(&format!("Interface overview generated from `{source}`.\n\n"));
        }

        for entity in system.entities() {
            render_entity(&mut doc, entity);
        }

        Ok(RenderOutput {
            text: doc,
            data: serde_json::to_value(system)?,
        })
    }
}

fn render_entity(doc: &mut String, entity: &Entity) {
    doc.push_str(&format!("# {} component overview\n\n", entity.name()));

    doc.push_str("## Generic overview\n\n");
    if entity.generics().is_empty() {
        doc.push_str("No generics.\n\n");
    } else {
        push_table(
            doc,
            &GENERIC_COLUMNS,
            entity.generics().iter().map(|g| generic_row(g).to_vec()),
        );
    }

    doc.push_str("## Port overview\n\n");
    if entity.ports().is_empty() {
        doc.push_str("No ports.\n\n");
    } else {
        push_table(
            doc,
            &PORT_COLUMNS,
            entity.ports().iter().map(|p| port_row(p).to_vec()),
        );
    }
}

fn push_table(doc: &mut String, headers: &[&str], rows: impl Iterator<Item = Vec<String>>) {
    doc.push_str(&format!("|{}|\n", headers.join("|")));
    doc.push_str(&format!("|{}|\n", vec!["-"; headers.len()].join("|")));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        doc.push_str(&format!("|{}|\n", cells.join("|")));
    }
    doc.push('\n');
}

/// Pipes would split the cell and line breaks would end the row.
fn escape_cell(cell: &str) -> String {
    cell.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}
