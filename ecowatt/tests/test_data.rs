use chrono::NaiveDate;
use ecowatt::data::{
    format_timestamp, parse_timestamp, save_series_csv, write_forecast_csv, write_series_csv,
};
use ecowatt::generator::generate;
use ecowatt::predictor::forecast_series;
use ecowatt::{DataLoader, EcoWattError, Frequency, LagRegression};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,consumption_kwh").unwrap();
    writeln!(file, "2023-01-01,100.5").unwrap();
    writeln!(file, "2023-01-02,98.0").unwrap();
    writeln!(file, "2023-01-03,103.25").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.values(), vec![100.5, 98.0, 103.25]);
}

#[test]
fn test_rows_are_sorted_by_date() {
    let csv = "date,consumption_kwh\n2023-01-03,3\n2023-01-01,1\n2023-01-02,2\n";
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
    assert_eq!(
        series.timestamps()[0],
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
}

#[test]
fn test_time_column_is_combined() {
    let csv = "date,time,consumption_kwh\n\
               2023-01-01,12:00:00,5\n\
               2023-01-01,00:00:00,4\n";
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(series.values(), vec![4.0, 5.0]);
    assert_eq!(
        series.timestamps()[1],
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    );
}

#[test]
fn test_extra_columns_and_header_case() {
    let csv = "site, Date ,Consumption_kWh\nA,2023-01-01,7\nA,2023-01-02,8\n";
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(series.values(), vec![7.0, 8.0]);
}

#[test]
fn test_data_loader_error_handling() {
    assert!(matches!(
        DataLoader::from_csv("nonexistent_file.csv"),
        Err(EcoWattError::Io(_))
    ));

    let missing_column = "date,price\n2023-01-01,1\n";
    assert!(matches!(
        DataLoader::from_reader(missing_column.as_bytes()),
        Err(EcoWattError::Data(_))
    ));

    let bad_number = "date,consumption_kwh\n2023-01-01,1\n2023-01-02,lots\n";
    match DataLoader::from_reader(bad_number.as_bytes()) {
        Err(EcoWattError::Parse(msg)) => assert!(msg.starts_with("line 3:")),
        other => panic!("Expected Parse error, got {:?}", other),
    }

    let bad_date = "date,consumption_kwh\n01/02/2023,1\n";
    assert!(matches!(
        DataLoader::from_reader(bad_date.as_bytes()),
        Err(EcoWattError::Parse(_))
    ));

    let duplicate = "date,consumption_kwh\n2023-01-01,1\n2023-01-01,2\n";
    assert!(matches!(
        DataLoader::from_reader(duplicate.as_bytes()),
        Err(EcoWattError::InvalidArgument(_))
    ));
}

#[test]
fn test_timestamp_formats() {
    let midnight = parse_timestamp("2023-05-06").unwrap();
    assert_eq!(format_timestamp(&midnight), "2023-05-06");

    let noon = parse_timestamp("2023-05-06T12:30:00").unwrap();
    assert_eq!(noon, parse_timestamp("2023-05-06 12:30:00").unwrap());
    assert_eq!(format_timestamp(&noon), "2023-05-06 12:30:00");
}

#[test]
fn test_generated_series_survives_csv() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let series = generate(start, 60, Frequency::Daily).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("energy_data.csv");
    save_series_csv(&series, &path).unwrap();

    let loaded = DataLoader::from_csv(&path).unwrap();
    assert_eq!(loaded, series);
}

#[test]
fn test_series_csv_layout() {
    let csv = "date,consumption_kwh\n2023-01-01,1.5\n2023-01-02,2\n";
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();

    let mut out = Vec::new();
    write_series_csv(&series, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "date,consumption_kwh\n2023-01-01,1.5\n2023-01-02,2\n"
    );
}

#[test]
fn test_forecast_csv_layout() {
    let csv = "date,consumption_kwh\n2023-01-01,1\n2023-01-02,2\n";
    let series = DataLoader::from_reader(csv.as_bytes()).unwrap();
    let model = LagRegression::from_parts(vec![1.0], 0.5).unwrap();
    let forecast = forecast_series(&model, &series, 2, Frequency::Daily).unwrap();

    let mut out = Vec::new();
    write_forecast_csv(&forecast, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "date,predicted_consumption\n2023-01-03,2.5\n2023-01-04,3\n"
    );
}
