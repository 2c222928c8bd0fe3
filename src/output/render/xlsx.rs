use crate::output::table::CellValue;
use crate::output::traits::{render_error, Renderer};
use crate::output::{OutputFormat, Table};
use crate::OutputResult;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

/// Most characters a single Excel cell can hold
const MAX_CELL_CHARS: usize = 32_767;

/// Single-sheet workbook with a bold header row
pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn render(&self, table: &Table) -> OutputResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        let types = table.column_types();

        for (col, name) in table.columns().iter().enumerate() {
            let col = ColNum::try_from(col).map_err(render_error(self.format()))?;
            worksheet
                .write_string_with_format(0, col, fit_cell(name), &header_format)
                .map_err(render_error(self.format()))?;
        }

        for (index, row) in table.rows().iter().enumerate() {
            let row_num = RowNum::try_from(index + 1).map_err(render_error(self.format()))?;
            for (col, (cell, kind)) in row.iter().zip(&types).enumerate() {
                let col = ColNum::try_from(col).map_err(render_error(self.format()))?;
                match CellValue::read(cell, *kind) {
                    CellValue::Integer(n) => {
                        worksheet
                            .write_number(row_num, col, n as f64)
                            .map_err(render_error(self.format()))?;
                    }
                    CellValue::Float(f) => {
                        worksheet
                            .write_number(row_num, col, f)
                            .map_err(render_error(self.format()))?;
                    }
                    CellValue::Text(text) => {
                        worksheet
                            .write_string(row_num, col, fit_cell(text))
                            .map_err(render_error(self.format()))?;
                    }
                    CellValue::Empty => {}
                }
            }
        }

        workbook.save_to_buffer().map_err(render_error(self.format()))
    }
}

/// Cuts text to the cell size limit
fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
