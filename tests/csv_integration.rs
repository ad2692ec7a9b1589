pub mod common;

use std::{
    fs::{self, read_to_string, File},
    io::Cursor,
};

use common::{init_logger, temp_csv_path};
use csv_grid::{
    core::{document::CsvDocument, value::CellValue},
    format::{
        csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder, options::CsvOptions,
        render::render_table,
    },
};

fn text_rows(document: &CsvDocument) -> Vec<Vec<String>> {
    document
        .rows()
        .map(|row| row.values().iter().map(ToString::to_string).collect())
        .collect()
}

#[test]
fn parse_headers_rows_and_cells() {
    let document = CsvParserBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_str("A,B,C\n1,2,3\n4,5,6")
        .unwrap();

    let titles: Vec<&str> = document.headers().titles().collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(document.num_rows(), 2);
    assert_eq!(document.num_columns(), 3);
    assert_eq!(document.get(0, 1).unwrap(), &CellValue::from("2"));
    assert_eq!(document.get(1, 2).unwrap(), &CellValue::from("6"));
}

#[test]
fn set_far_outside_an_empty_document_fills_the_gap() {
    let mut document = CsvDocument::new();

    document.set(5, 0, "x").unwrap();

    assert_eq!(document.num_rows(), 6);
    assert_eq!(document.num_columns(), 1);
    assert_eq!(document.get(2, 0).unwrap(), &CellValue::Empty);
    assert_eq!(document.get(5, 0).unwrap(), &CellValue::from("x"));
}

#[test]
fn every_cell_set_is_read_back() {
    let mut document = CsvDocument::new();
    let coordinates = [(0, 0), (3, 1), (1, 4), (7, 7), (2, 2)];

    for (row, column) in coordinates {
        document.set(row, column, format!("{row}:{column}")).unwrap();
    }

    for (row, column) in coordinates {
        assert_eq!(
            document.get(row, column).unwrap(),
            &CellValue::Text(format!("{row}:{column}"))
        );
    }
    assert_eq!(document.num_rows(), 8);
    assert_eq!(document.num_columns(), 8);
    let empty = document
        .rows()
        .flat_map(|row| row.cells().collect::<Vec<_>>())
        .filter(|cell| cell.value.is_empty())
        .count();
    assert_eq!(empty, 64 - coordinates.len());
}

#[test]
fn columns_view_walks_rows_in_order() {
    let document = CsvParserBuilder::new()
        .from_str("city,country\nBoston,United States\nConcord,United States")
        .unwrap();

    let column = document.column(0).unwrap();
    let cities: Vec<String> = column.values().map(ToString::to_string).collect();

    assert_eq!(column.header().map(|h| h.title()), Some("city"));
    assert_eq!(cities, vec!["Boston", "Concord"]);
    assert_eq!(document.columns().len(), 2);
}

#[test]
fn round_trip_through_text_keeps_shape_and_values() {
    init_logger();

    let source = "year|make|model\n1948|Porsche|356\n1995|Peugeot|205\n2021|Mazda|CX-30\n";
    let document = CsvParserBuilder::new()
        .delimiter(b'|')
        .from_str(source)
        .unwrap();

    let text = CsvSerializerBuilder::new()
        .delimiter(b'|')
        .build()
        .to_string(&document)
        .unwrap();
    let reparsed = CsvParserBuilder::new()
        .delimiter(b'|')
        .from_str(&text)
        .unwrap();

    assert_eq!(reparsed.num_rows(), document.num_rows());
    assert_eq!(reparsed.num_columns(), document.num_columns());
    assert_eq!(text_rows(&reparsed), text_rows(&document));
    assert_eq!(text, source);
}

#[test]
fn headerless_round_trip() {
    let document = CsvParserBuilder::new()
        .has_headers(false)
        .from_lines(["1,2", "3,4"])
        .unwrap();

    let lines = CsvSerializerBuilder::for_document(&document)
        .build()
        .to_lines(&document)
        .unwrap();

    assert_eq!(lines, vec!["1,2", "3,4"]);
}

#[test]
fn file_round_trip_records_the_filename() {
    init_logger();

    let input_path = temp_csv_path();
    fs::write(&input_path, "id,name\r\nP001,Headphones\r\nP002,Cable\r\n").unwrap();

    let document = CsvParserBuilder::new().from_path(&input_path).unwrap();
    assert_eq!(document.filename(), Some(input_path.as_path()));
    assert_eq!(document.num_rows(), 2);

    let output_path = temp_csv_path();
    CsvSerializerBuilder::for_document(&document)
        .build()
        .to_path(&document, &output_path)
        .unwrap();

    let written = read_to_string(&output_path).unwrap();
    assert_eq!(written, "id,name\nP001,Headphones\nP002,Cable\n");

    fs::remove_file(&input_path).ok();
    fs::remove_file(&output_path).ok();
}

#[test]
fn to_path_replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    fs::write(&path, "a much longer previous content\nthat must disappear\n").unwrap();

    let mut document = CsvDocument::new();
    document.append_header("k").unwrap();
    document.set(0, 0, 1_i32).unwrap();

    CsvSerializerBuilder::new()
        .build()
        .to_path(&document, &path)
        .unwrap();

    assert_eq!(read_to_string(&path).unwrap(), "k\n1\n");
}

#[test]
fn reader_sources_parse_like_strings() {
    let path = temp_csv_path();
    fs::write(&path, "a;b\n1;2\n").unwrap();

    let from_file = CsvParserBuilder::new()
        .delimiter(b';')
        .from_reader(File::open(&path).unwrap())
        .unwrap();
    let from_cursor = CsvParserBuilder::new()
        .delimiter(b';')
        .from_reader(Cursor::new("a;b\n1;2\n"))
        .unwrap();

    assert_eq!(from_file, from_cursor);
    fs::remove_file(&path).ok();
}

#[test]
fn options_configure_both_directions() {
    let options: CsvOptions = serde_json::from_str(r#"{"delimiter":"\t"}"#).unwrap();
    assert!(options.has_headers);

    let document = CsvParserBuilder::from_options(&options)
        .unwrap()
        .from_str("a\tb\n1\t2")
        .unwrap();
    let text = CsvSerializerBuilder::from_options(&options)
        .unwrap()
        .has_headers(false)
        .build()
        .to_string(&document)
        .unwrap();

    assert_eq!(text, "1\t2\n");
}

#[test]
fn rendered_table_lines_up() {
    let document = CsvParserBuilder::new()
        .from_str("id,name\n1,Alexandra\n22,Bo")
        .unwrap();

    let table = render_table(&document);
    let widths: Vec<usize> = table.lines().map(|line| line.chars().count()).collect();

    assert_eq!(widths, vec![20, 21, 20, 20]);
    assert_eq!(table, document.to_string());
}
