use std::fmt;

use crate::core::document::CsvDocument;

/// Renders a document as a plain-text table.
///
/// Each column is as wide as its longest header title or cell text. Header
/// titles are centred, cell values are indented by two spaces, columns are
/// separated by `|` and a dashed rule follows the header line.
///
/// ```
/// use csv_grid::format::{csv_parser::CsvParserBuilder, render::render_table};
///
/// let document = CsvParserBuilder::new().from_str("id,name\n1,Bo").unwrap();
/// let table = render_table(&document);
///
/// assert_eq!(table.lines().count(), 3);
/// assert!(table.lines().nth(2).unwrap().starts_with("  1"));
/// ```
pub fn render_table(document: &CsvDocument) -> String {
    let widths = column_widths(document);
    let mut table = String::new();

    if document.has_headers() {
        let titles: Vec<String> = (0..widths.len())
            .map(|index| header_text(document, index))
            .collect();
        table.push_str(&build_row(&titles, &widths, true));
        table.push('\n');
    }

    let rule = widths.iter().map(|width| width + 4).sum::<usize>() + widths.len();
    table.push_str(&"-".repeat(rule));
    table.push('\n');

    for row in document.rows() {
        let values: Vec<String> = (0..widths.len())
            .map(|index| row.get(index).map(ToString::to_string).unwrap_or_default())
            .collect();
        table.push_str(&build_row(&values, &widths, false));
        table.push('\n');
    }

    table
}

fn header_text(document: &CsvDocument, index: usize) -> String {
    document
        .headers()
        .get(index)
        .map(|header| header.title().to_string())
        .unwrap_or_default()
}

fn column_widths(document: &CsvDocument) -> Vec<usize> {
    let mut count = document.num_columns();
    if document.has_headers() {
        count = count.max(document.headers().len());
    }

    (0..count)
        .map(|index| {
            let header = if document.has_headers() {
                header_text(document, index).chars().count()
            } else {
                0
            };

            let cells = document
                .column(index)
                .map(|column| {
                    column
                        .values()
                        .map(|value| value.to_string().chars().count())
                        .max()
                        .unwrap_or(0)
                })
                .unwrap_or(0);

            header.max(cells)
        })
        .collect()
}

fn build_row(values: &[String], widths: &[usize], center: bool) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(text, width)| {
            let total = width + 4;
            let len = text.chars().count();
            let left = if center { (total - len) / 2 } else { 2 };
            let right = total - len - left;

            format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
        })
        .collect::<Vec<_>>()
        .join("|")
}

impl fmt::Display for CsvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(self))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::render_table;
    use crate::{core::document::CsvDocument, format::csv_parser::CsvParserBuilder};

    #[test]
    fn widths_come_from_the_longest_text() -> Result<(), Box<dyn Error>> {
        let document = CsvParserBuilder::new().from_str("id,name\n1,Alexandra\n22,Bo")?;

        let table = render_table(&document);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "  id  |    name     ");
        assert_eq!(lines[1], "-".repeat(6 + 13 + 2));
        assert_eq!(lines[2], "  1   |  Alexandra  ");
        assert_eq!(lines[3], "  22  |  Bo         ");
        Ok(())
    }

    #[test]
    fn header_line_is_skipped_without_headers() -> Result<(), Box<dyn Error>> {
        let document = CsvParserBuilder::new()
            .has_headers(false)
            .from_str("a,b")?;

        let table = document.to_string();

        assert_eq!(table, "------------\n  a  |  b  \n");
        Ok(())
    }

    #[test]
    fn empty_document_renders_an_empty_rule() {
        assert_eq!(render_table(&CsvDocument::new()), "\n\n");
    }
}
