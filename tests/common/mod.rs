#![allow(dead_code)]

pub mod mocks;

use std::{env::temp_dir, path::PathBuf};

use csv_grid::binding::{Field, Record};
use rand::distr::{Alphanumeric, SampleString};

pub use mocks::{MockSink, MockSource};

/// A path under the system temp directory that no other test will pick.
pub fn temp_csv_path() -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{}.csv", file_name))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub available: bool,
    pub grade: char,
    pub tags: Vec<String>,
}

impl Record for Product {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("id", |p: &Product| p.id.clone(), |p: &mut Product, v| p.id = v),
            Field::new("name", |p: &Product| p.name.clone(), |p: &mut Product, v| p.name = v),
            Field::new("price", |p: &Product| p.price, |p: &mut Product, v| p.price = v),
            Field::new("stock", |p: &Product| p.stock, |p: &mut Product, v| p.stock = v),
            Field::new("available", |p: &Product| p.available, |p: &mut Product, v| {
                p.available = v
            }),
            Field::new("grade", |p: &Product| p.grade, |p: &mut Product, v| p.grade = v),
            Field::opaque("tags"),
        ]
    }
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "P001".to_string(),
            name: "Wireless Headphones".to_string(),
            price: 79.99,
            stock: 12,
            available: true,
            grade: 'A',
            tags: vec!["audio".to_string()],
        },
        Product {
            id: "P002".to_string(),
            name: "USB-C Cable".to_string(),
            price: 12.5,
            stock: 0,
            available: false,
            grade: 'C',
            tags: Vec::new(),
        },
        Product {
            id: "P003".to_string(),
            name: "Smart Watch".to_string(),
            price: 149.0,
            stock: 3,
            available: true,
            grade: 'B',
            tags: Vec::new(),
        },
    ]
}
