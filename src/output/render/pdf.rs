use crate::output::traits::{render_error, Renderer};
use crate::output::{OutputFormat, Table};
use crate::OutputResult;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

// US letter, in millimetres
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 6.0;
const FONT_SIZE: f32 = 8.0;
const CELL_PADDING: f32 = 1.5;

// Average Helvetica glyph width is about half the font size; 1pt = 0.3528mm
const GLYPH_WIDTH_MM: f32 = FONT_SIZE * 0.5 * 0.3528;

/// Paginated table on US-letter pages, header repeated on every page
pub struct PdfRenderer;

struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

struct TableLayout {
    column_width: f32,
    max_chars: usize,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl TableLayout {
    fn new(columns: usize, regular: IndirectFontRef, bold: IndirectFontRef) -> Self {
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.max(1) as f32;
        let max_chars = (((column_width - 2.0 * CELL_PADDING) / GLYPH_WIDTH_MM) as usize).max(1);
        Self {
            column_width,
            max_chars,
            regular,
            bold,
        }
    }

    /// Starts a page and draws the header row on it
    fn new_page(&self, doc: &PdfDocumentReference, columns: &[String]) -> PageCursor {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
        let layer = doc.get_page(page).get_layer(layer);
        self.start_page(layer, columns)
    }

    fn start_page(&self, layer: PdfLayerReference, columns: &[String]) -> PageCursor {
        let y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
        self.draw_row(&layer, columns, y, &self.bold);
        self.draw_rule(&layer, y - CELL_PADDING);
        PageCursor {
            layer,
            y: y - ROW_HEIGHT,
        }
    }

    fn draw_row(&self, layer: &PdfLayerReference, cells: &[String], y: f32, font: &IndirectFontRef) {
        for (index, cell) in cells.iter().enumerate() {
            let x = MARGIN + index as f32 * self.column_width + CELL_PADDING;
            layer.use_text(
                truncate(cell, self.max_chars),
                FONT_SIZE,
                Mm(x),
                Mm(y),
                font,
            );
        }
    }

    fn draw_rule(&self, layer: &PdfLayerReference, y: f32) {
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
            ],
            is_closed: false,
        });
    }
}

impl Renderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, table: &Table) -> OutputResult<Vec<u8>> {
        let (doc, page, layer) =
            PdfDocument::new("Converted Table", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error(self.format()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error(self.format()))?;

        let layout = TableLayout::new(table.columns().len(), regular, bold);
        let mut cursor = layout.start_page(doc.get_page(page).get_layer(layer), table.columns());

        for row in table.rows() {
            if cursor.y < MARGIN {
                cursor = layout.new_page(&doc, table.columns());
            }
            layout.draw_row(&cursor.layer, row, cursor.y, &layout.regular);
            cursor.y -= ROW_HEIGHT;
        }

        doc.save_to_bytes().map_err(render_error(self.format()))
    }
}

/// Shortens text to at most `max_chars` characters, marking the cut with "..."
fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut shortened: String = text.chars().take(max_chars - 3).collect();
    shortened.push_str("...");
    shortened
}
