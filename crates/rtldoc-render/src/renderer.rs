//! Renderer trait and core abstractions for the documentation layer.

use rtldoc_core::System;
use serde_json::Value;

use crate::error::{RenderError, Result};
use crate::json::JsonRenderer;
use crate::markdown::MarkdownRenderer;
use crate::text::TextRenderer;

/// The document format to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Markdown,
    Text,
    Json,
}

impl DocFormat {
    /// Parse a format name.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "markdown" | "md" => Ok(DocFormat::Markdown),
            "text" | "txt" => Ok(DocFormat::Text),
            "json" => Ok(DocFormat::Json),
            _ => Err(RenderError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }

    /// Display name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            DocFormat::Markdown => "markdown",
            DocFormat::Text => "text",
            DocFormat::Json => "json",
        }
    }

    /// File extension for documents in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Markdown => "md",
            DocFormat::Text => "txt",
            DocFormat::Json => "json",
        }
    }
}

/// The output of a render.
#[derive(Debug)]
pub struct RenderOutput {
    /// The document itself.
    pub text: String,
    /// Machine-readable JSON (always populated).
    pub data: Value,
}

/// Everything a renderer needs besides the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Document title.
    pub title: String,
    /// Name of the HDL file the system was read from.
    pub source: Option<String>,
}

impl RenderContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// A context titled after the system.
    pub fn for_system(system: &System) -> Self {
        Self::new(system.name())
    }
}

/// Trait for all document renderers.
pub trait Renderer {
    /// Render the system's interface tables.
    fn render(&self, system: &System, ctx: &RenderContext) -> Result<RenderOutput>;

    /// The format this renderer produces.
    fn format(&self) -> DocFormat;
}

/// The renderer for a format.
pub fn renderer_for(format: DocFormat) -> Box<dyn Renderer> {
    match format {
        DocFormat::Markdown => Box::new(MarkdownRenderer),
        DocFormat::Text => Box::new(TextRenderer),
        DocFormat::Json => Box::new(JsonRenderer),
    }
}

/// List all available formats.
pub fn available_formats() -> &'static [DocFormat] {
    &[DocFormat::Markdown, DocFormat::Text, DocFormat::Json]
}
