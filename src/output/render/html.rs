use crate::output::traits::Renderer;
use crate::output::{OutputFormat, Table};
use crate::OutputResult;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Converted Table</title>
    <style>
        body { font-family: 'Inter', sans-serif; margin: 2rem; background-color: #2d3748; color: #e2e8f0; }
        .container { background-color: #4a5568; padding: 2rem; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
        h1 { color: #e2e8f0; text-align: center; }
        .table-auto { width: 100%; border-collapse: collapse; }
        .table-auto th, .table-auto td { border: 1px solid #718096; padding: 8px; text-align: left; }
        .table-auto th { background-color: #4a5568; color: #a0aec0; }
        .table-auto tr:nth-child(even) { background-color: #2d3748; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Converted Table</h1>
"#;

const DOCUMENT_TAIL: &str = "    </div>\n</body>\n</html>\n";

/// Standalone styled HTML document wrapping the table
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn render_table(table: &Table) -> String {
        let mut html = String::from("        <table class=\"table-auto\">\n");

        html.push_str("            <thead>\n                <tr>");
        for column in table.columns() {
            html.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        html.push_str("</tr>\n            </thead>\n            <tbody>\n");

        for row in table.rows() {
            html.push_str("                <tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("            </tbody>\n        </table>\n");
        html
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, table: &Table) -> OutputResult<Vec<u8>> {
        let mut document = String::from(DOCUMENT_HEAD);
        document.push_str(&Self::render_table(table));
        document.push_str(DOCUMENT_TAIL);
        Ok(document.into_bytes())
    }
}

/// Escapes text for use in HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
