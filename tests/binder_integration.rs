pub mod common;

use common::{init_logger, products, temp_csv_path, Product};
use csv_grid::{
    binding::{Field, Record, RecordBinder},
    core::value::CellValue,
    format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder},
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    age: i32,
}

impl Record for Person {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("Name", |p: &Person| p.name.clone(), |p: &mut Person, v| p.name = v),
            Field::new("Age", |p: &Person| p.age, |p: &mut Person, v| p.age = v),
        ]
    }
}

fn without_tags(product: &Product) -> Product {
    Product {
        tags: Vec::new(),
        ..product.clone()
    }
}

#[test]
fn removing_the_first_of_two_people_leaves_the_second() {
    let mut binder = RecordBinder::<Person>::new();
    binder
        .add(&Person {
            name: "Bo".to_string(),
            age: 9,
        })
        .unwrap();
    binder
        .add(&Person {
            name: "Al".to_string(),
            age: 40,
        })
        .unwrap();

    binder.remove(0).unwrap();

    assert_eq!(binder.num_rows(), 1);
    assert_eq!(
        binder.get(0).unwrap(),
        Person {
            name: "Al".to_string(),
            age: 40
        }
    );
}

#[test]
fn products_round_trip_field_by_field() {
    let mut binder = RecordBinder::<Product>::new();
    binder.add_range(products()).unwrap();

    let restored = binder.get_all().unwrap();
    let expected: Vec<Product> = products().iter().map(without_tags).collect();

    assert_eq!(restored, expected);
    assert_eq!(
        binder.document().headers().titles().collect::<Vec<_>>(),
        vec!["available", "grade", "id", "name", "price", "stock"]
    );
}

#[test]
fn records_survive_a_trip_through_a_file() {
    init_logger();

    let mut binder = RecordBinder::<Product>::new();
    binder.set_header_map("price", "unit price").unwrap();
    binder.ignore("grade").unwrap();
    binder.add_range(products()).unwrap();

    let path = temp_csv_path();
    CsvSerializerBuilder::for_document(binder.document())
        .build()
        .to_path(binder.document(), &path)
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("available,id,name,unit price,stock\n"));
    assert!(written.contains("true,P001,Wireless Headphones,79.99,12\n"));

    let document = CsvParserBuilder::new().from_path(&path).unwrap();
    let reloaded = RecordBinder::<Product>::with_options([("price", "unit price")], ["grade"])
        .unwrap()
        .with_document(document)
        .unwrap();

    assert_eq!(reloaded.document().num_columns(), 5);
    let expected: Vec<Product> = products()
        .iter()
        .map(|product| Product {
            grade: char::default(),
            ..without_tags(product)
        })
        .collect();
    assert_eq!(reloaded.get_all().unwrap(), expected);

    std::fs::remove_file(&path).ok();
}

#[test]
fn parsed_documents_bind_with_renamed_headers() {
    let document = CsvParserBuilder::new()
        .from_str("Full name,Age\nBo,9\nAl,40")
        .unwrap();

    let binder = RecordBinder::<Person>::with_options([("Name", "Full name")], Vec::<&str>::new())
        .unwrap()
        .with_document(document)
        .unwrap();

    assert_eq!(binder.document().num_columns(), 2);
    assert_eq!(
        binder.get_all().unwrap(),
        vec![
            Person {
                name: "Bo".to_string(),
                age: 9
            },
            Person {
                name: "Al".to_string(),
                age: 40
            }
        ]
    );
}

#[test]
fn unmatched_fields_get_an_empty_column() {
    let document = CsvParserBuilder::new()
        .from_str("Full name,Age\nBo,9")
        .unwrap();

    let binder = RecordBinder::<Person>::from_document(document).unwrap();

    assert_eq!(binder.document().num_columns(), 3);
    assert_eq!(
        binder.document().headers().get(2).map(|h| h.title()),
        Some("Name")
    );
    assert_eq!(
        binder.get(0).unwrap(),
        Person {
            name: String::new(),
            age: 9
        }
    );
}

#[test]
fn ignore_and_acknowledge_shift_columns() {
    let mut binder = RecordBinder::<Product>::new();
    binder.add_range(products()).unwrap();

    binder.ignore("id").unwrap();

    let indexed: Vec<(usize, &str)> = binder
        .document()
        .headers()
        .iter()
        .map(|h| (h.index(), h.title()))
        .collect();
    assert_eq!(
        indexed,
        vec![
            (0, "available"),
            (1, "grade"),
            (2, "name"),
            (3, "price"),
            (4, "stock")
        ]
    );
    assert_eq!(binder.get(0).unwrap().id, "");

    binder.acknowledge("id").unwrap();

    assert_eq!(binder.document().num_columns(), 6);
    assert_eq!(
        binder.document().headers().get(5).map(|h| h.title()),
        Some("id")
    );
    assert_eq!(binder.document().get(2, 5).unwrap(), &CellValue::Empty);

    binder.add(&products()[0]).unwrap();
    assert_eq!(binder.get(3).unwrap().id, "P001");
}
