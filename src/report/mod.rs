//! Report assembly and rendering.
//!
//! This module handles:
//! - Assembling parsed records into chart-ready tables
//! - The HTML template resource
//! - Rendering tables as inline SVG bar charts and the final HTML page

pub mod assembler;
pub mod chart;
pub mod html;
pub mod model;
pub mod template;

// Re-export main types
pub use assembler::{assemble, flamegraph_label, relative_link};
pub use chart::ChartConfig;
pub use html::render_document;
pub use model::{ChartRow, ChartTable, FlamegraphLink, RenderableDocument, ReportContext};
pub use template::ReportTemplate;
