use crate::output::traits::{render_error, Renderer};
use crate::output::{OutputFormat, Table};
use crate::OutputResult;

/// Comma-separated values with a header row
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn render(&self, table: &Table) -> OutputResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(render_error(self.format()))
    }
}
