//! Renderer trait shared by every output format

use crate::output::{OutputFormat, Table};
use crate::{OutputError, OutputResult};
use std::fmt::Display;

/// Turns a table into the bytes of one output format
///
/// Renderers are stateless and must either produce a complete file or fail;
/// a partial file is never returned.
pub trait Renderer: Send + Sync {
    /// The format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Renders the whole table
    fn render(&self, table: &Table) -> OutputResult<Vec<u8>>;
}

/// Wraps a library error as a render failure for `format`
pub(crate) fn render_error<E: Display>(format: OutputFormat) -> impl FnOnce(E) -> OutputError {
    move |e| OutputError::Render {
        format,
        message: e.to_string(),
    }
}
