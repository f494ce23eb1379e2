//! Tabular documentation for normalized HDL interfaces.
//!
//! Every entity becomes two tables, generics and ports, rendered as
//! pandoc-ready markdown, box-drawn terminal text, or JSON.

pub mod error;
pub mod format;
pub mod json;
pub mod markdown;
pub mod renderer;
pub mod text;

pub use error::RenderError;
pub use format::{
    format_default, format_hex, format_range, format_type, generic_row, port_row,
    GENERIC_COLUMNS, PORT_COLUMNS,
};
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use renderer::{available_formats, renderer_for, DocFormat, RenderContext, RenderOutput, Renderer};
pub use text::TextRenderer;
