use std::env::temp_dir;

use csv_grid::{
    binding::{Field, Record, RecordBinder},
    format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder},
    CsvError,
};
use log::info;

#[derive(Debug, Default, Clone)]
struct Car {
    year: u16,
    make: String,
    model: String,
    electric: bool,
    owners: Vec<String>,
}

impl Record for Car {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("year", |car: &Car| car.year, |car: &mut Car, v| car.year = v),
            Field::new("make", |car: &Car| car.make.clone(), |car: &mut Car, v| car.make = v),
            Field::new("model", |car: &Car| car.model.clone(), |car: &mut Car, v| car.model = v),
            Field::new("electric", |car: &Car| car.electric, |car: &mut Car, v| {
                car.electric = v
            }),
            Field::opaque("owners"),
        ]
    }
}

fn main() -> Result<(), CsvError> {
    env_logger::init();

    let mut binder = RecordBinder::<Car>::with_options([("make", "Manufacturer")], ["electric"])?;
    binder.add_range([
        Some(Car {
            year: 1948,
            make: "Porsche".to_string(),
            model: "356".to_string(),
            ..Car::default()
        }),
        None,
        Some(Car {
            year: 2021,
            make: "Mazda".to_string(),
            model: "MX-30".to_string(),
            electric: true,
            owners: vec!["Alex".to_string()],
        }),
    ])?;

    binder.acknowledge("electric")?;
    binder.add(&Car {
        year: 2012,
        make: "Tesla".to_string(),
        model: "Model S".to_string(),
        electric: true,
        owners: Vec::new(),
    })?;

    println!("{}", binder.document());

    let path = temp_dir().join("cars.csv");
    CsvSerializerBuilder::for_document(binder.document())
        .build()
        .to_path(binder.document(), &path)?;
    info!("Wrote {}", path.display());

    let document = CsvParserBuilder::new().from_path(&path)?;
    let reloaded = RecordBinder::<Car>::with_options([("make", "Manufacturer")], Vec::<&str>::new())?
        .with_document(document)?;

    for car in reloaded.get_all()? {
        println!("{car:?}");
    }

    Ok(())
}
