//! Output module for converting tabular data into downloadable files
//!
//! This module handles:
//! - The in-memory `Table` shared by crawls and uploads
//! - Reading uploaded delimited text
//! - Rendering tables as csv, xlsx, pdf, json or html

mod format;
mod reader;
mod render;
mod table;
mod traits;

pub use format::{suggested_filename, OutputFormat, RenderedFile};
pub use reader::{delimiter_for_filename, read_delimited};
pub use render::{
    renderer_for, CsvRenderer, HtmlRenderer, JsonRenderer, PdfRenderer, XlsxRenderer,
};
pub use table::{CellValue, ColumnType, Table};
pub use traits::Renderer;

use crate::OutputResult;
use chrono::Local;

/// Picks the renderer for a format; [`renderer_for`] unless overridden
pub type RendererFactory = fn(OutputFormat) -> Box<dyn Renderer>;

/// Converts a table into a complete file of the requested format
///
/// # Arguments
///
/// * `table` - The data to convert
/// * `format` - The output encoding
/// * `filename_prefix` - Prefix of the suggested filename
///
/// # Returns
///
/// * `Ok(RenderedFile)` - Bytes, MIME type and a timestamped filename
/// * `Err(OutputError)` - Rendering failed; no partial file is produced
pub fn convert(
    table: &Table,
    format: OutputFormat,
    filename_prefix: &str,
) -> OutputResult<RenderedFile> {
    convert_with(renderer_for(format).as_ref(), table, filename_prefix)
}

/// Converts a table with a specific renderer
pub fn convert_with(
    renderer: &dyn Renderer,
    table: &Table,
    filename_prefix: &str,
) -> OutputResult<RenderedFile> {
    let format = renderer.format();
    let bytes = renderer.render(table)?;

    tracing::debug!(
        "Rendered {} rows as {} ({} bytes)",
        table.len(),
        format,
        bytes.len()
    );

    Ok(RenderedFile {
        bytes,
        mime_type: format.mime_type().to_string(),
        filename: suggested_filename(filename_prefix, format, Local::now()),
    })
}
