pub mod common;

use common::{init_logger, temp_csv_path};
use csv_grid::{
    format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder},
    CsvError,
};

#[tokio::test]
async fn async_round_trip_through_a_file() {
    init_logger();

    let document = CsvParserBuilder::new()
        .delimiter(b'\t')
        .from_str("sku\tqty\nA-1\t4\nB-2\t0")
        .unwrap();

    let path = temp_csv_path();
    let serializer = CsvSerializerBuilder::for_document(&document).build();
    serializer.to_path_async(&document, &path).await.unwrap();

    assert_eq!(
        tokio::fs::read_to_string(&path).await.unwrap(),
        "sku\tqty\nA-1\t4\nB-2\t0\n"
    );

    let reloaded = CsvParserBuilder::new()
        .delimiter(b'\t')
        .build()
        .parse_path_async(&path)
        .await
        .unwrap();

    assert_eq!(reloaded.filename(), Some(path.as_path()));
    assert_eq!(reloaded.num_rows(), 2);
    assert_eq!(reloaded.get(1, 0).unwrap().to_string(), "B-2");

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn async_entry_points_validate_paths() {
    let parser = CsvParserBuilder::new().build();
    assert!(matches!(
        parser.parse_path_async("").await,
        Err(CsvError::MissingArgument("filename"))
    ));
    assert!(matches!(
        parser.parse_path_async(temp_csv_path()).await,
        Err(CsvError::FileNotFound(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    let document = CsvParserBuilder::new().from_str("a\n1").unwrap();
    let target = dir.path().join("missing").join("out.csv");

    assert!(matches!(
        CsvSerializerBuilder::new()
            .build()
            .to_path_async(&document, &target)
            .await,
        Err(CsvError::DirectoryNotFound(_))
    ));
}

#[tokio::test]
async fn async_reads_of_non_text_files_are_invalid_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.csv");
    tokio::fs::write(&path, b"id,name\n1,\xff\xfe\n").await.unwrap();

    let sync_error = CsvParserBuilder::new().from_path(&path).unwrap_err();
    let async_error = CsvParserBuilder::new()
        .from_path_async(&path)
        .await
        .unwrap_err();

    assert!(matches!(sync_error, CsvError::InvalidArgument(_)));
    assert!(matches!(async_error, CsvError::InvalidArgument(_)));
}
