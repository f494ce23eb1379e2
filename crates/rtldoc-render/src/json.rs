//! JSON renderer: the normalized system for other tools.

use rtldoc_core::System;
use serde_json::json;

use crate::error::Result;
use crate::renderer::{DocFormat, RenderContext, RenderOutput, Renderer};

/// Renders the normalized system as a JSON document.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self) -> DocFormat {
        DocFormat::Json
    }

    fn render(&self, system: &System, ctx: &RenderContext) -> Result<RenderOutput> {
        let data = json!({
            "title": ctx.title,
            "source": ctx.source,
            "system": system,
        });
        Ok(RenderOutput {
            text: serde_json::to_string_pretty(&data)?,
            data,
        })
    }
}
