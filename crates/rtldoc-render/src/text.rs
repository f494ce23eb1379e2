//! Terminal renderer: box-drawn tables per entity.

use rtldoc_core::System;

use crate::error::Result;
use crate::format::{generic_row, port_row, GENERIC_COLUMNS, PORT_COLUMNS};
use crate::renderer::{DocFormat, RenderContext, RenderOutput, Renderer};

/// Renders the interface tables for reading in a terminal.
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn format(&self) -> DocFormat {
        DocFormat::Text
    }

    fn render(&self, system: &System, ctx: &RenderContext) -> Result<RenderOutput> {
        let mut text = format!("=== {} ===\n", ctx.title);
        if let Some(source) = &ctx.source {
            text.push_str(&format!("source: {source}\n"));
        }

        let (mut generics, mut ports) = (0, 0);
        for entity in system.entities() {
            generics += entity.generics().len();
            ports += entity.ports().len();

            text.push_str(&format!("\n--- {} ---\n\n", entity.name()));

            text.push_str("Generics:\n");
            if entity.generics().is_empty() {
                text.push_str("  (none)\n");
            } else {
                let rows: Vec<Vec<String>> =
                    entity.generics().iter().map(|g| generic_row(g).to_vec()).collect();
                text.push_str(&draw_table(&GENERIC_COLUMNS, &rows));
            }

            text.push_str("\nPorts:\n");
            if entity.ports().is_empty() {
                text.push_str("  (none)\n");
            } else {
                let rows: Vec<Vec<String>> =
                    entity.ports().iter().map(|p| port_row(p).to_vec()).collect();
                text.push_str(&draw_table(&PORT_COLUMNS, &rows));
            }
        }

        let entities = system.entities().len();
        text.push_str(&format!(
            "\n{} entit{}: {} generics, {} ports\n",
            entities,
            if entities == 1 { "y" } else { "ies" },
            generics,
            ports,
        ));

        Ok(RenderOutput {
            text,
            data: serde_json::to_value(system)?,
        })
    }
}

/// Draw a table with box characters. Column widths fit the widest cell.
fn draw_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(h.chars().count())
        })
        .collect();

    let rule = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(&mid.to_string()))
    };
    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {c}{} ", " ".repeat(w - c.chars().count())))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule('┌', '┬', '┐');
    out.push_str(&line(headers));
    out.push_str(&rule('├', '┼', '┤'));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out.push_str(&rule('└', '┴', '┘'));
    out
}
