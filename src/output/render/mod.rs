//! One renderer per output format

mod csv;
mod html;
mod json;
mod pdf;
mod xlsx;

pub use self::csv::CsvRenderer;
pub use self::html::HtmlRenderer;
pub use self::json::JsonRenderer;
pub use self::pdf::PdfRenderer;
pub use self::xlsx::XlsxRenderer;

use crate::output::traits::Renderer;
use crate::output::OutputFormat;

/// Returns the renderer for a format
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Csv => Box::new(CsvRenderer),
        OutputFormat::Xlsx => Box::new(XlsxRenderer),
        OutputFormat::Pdf => Box::new(PdfRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer),
    }
}
