use crate::output::table::{CellValue, ColumnType};
use crate::output::traits::{render_error, Renderer};
use crate::output::{OutputFormat, Table};
use crate::OutputResult;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Array of row objects keyed by column name, indented by four spaces
pub struct JsonRenderer;

impl JsonRenderer {
    fn cell_to_value(cell: &str, column: ColumnType) -> Value {
        match CellValue::read(cell, column) {
            CellValue::Integer(n) => Value::from(n),
            CellValue::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(cell.to_string())),
            CellValue::Text(text) => Value::String(text.to_string()),
            CellValue::Empty => Value::Null,
        }
    }
}

impl Renderer for JsonRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, table: &Table) -> OutputResult<Vec<u8>> {
        let types = table.column_types();
        let records: Vec<Value> = table
            .rows()
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .columns()
                    .iter()
                    .zip(row)
                    .zip(&types)
                    .map(|((column, cell), kind)| {
                        (column.clone(), Self::cell_to_value(cell, *kind))
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        records
            .serialize(&mut serializer)
            .map_err(render_error(self.format()))?;
        Ok(buffer)
    }
}
