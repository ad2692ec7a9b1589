use csv_grid::{
    format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder},
    CsvError,
};
use log::info;

fn main() -> Result<(), CsvError> {
    env_logger::init();

    let csv = "year;make;model;description
1948;Porsche;356;Luxury sports car
1967;Ford;Mustang fastback 1967;American car
1995;Peugeot;205;";

    let mut document = CsvParserBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .from_str(csv)?;

    info!(
        "Parsed {} rows and {} columns",
        document.num_rows(),
        document.num_columns()
    );

    document.set(2, 3, "Hatchback")?;
    let index = document.append_column("country")?;
    for (row, country) in ["Germany", "United States", "France"].into_iter().enumerate() {
        document.set(row, index, country)?;
    }

    println!("{document}");

    let text = CsvSerializerBuilder::new()
        .delimiter(b',')
        .build()
        .to_string(&document)?;
    print!("{text}");

    Ok(())
}
