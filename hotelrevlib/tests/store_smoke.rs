use hotelrevlib::{
    artifact::LinearRevenueModel,
    error::HotelRevError,
    features::{FEATURE_NAMES, FEATURE_SCHEMA_VERSION},
    model::RoomTypePolicy,
    store::{DatasetStore, ModelStore},
    traits::RevenueModel,
};
use std::io::Write;
use tempfile::NamedTempFile;

const CSV: &str = "Booking_id,Total_bill,Checkin_month,Is_weekend,Room_type_Executive,Room_type_Standard,Room_type_Suite
B1,1000,1,0,0,1,0
B2,2000,2,1,1,0,0
";

fn model_json(features: &[&str], schema_version: u32) -> String {
    serde_json::json!({
        "name": "revenue-linear",
        "schema_version": schema_version,
        "features": features,
        "intercept": 100.0,
        "coefficients": [0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 50.0, 0.0, 0.0, 0.0],
    })
    .to_string()
}

fn temp_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f
}

#[test]
fn dataset_store_reads_source_once() {
    let file = temp_file(CSV);
    let store = DatasetStore::new(file.path(), RoomTypePolicy::Strict);
    assert!(!store.is_loaded());

    let first = store.get().expect("first load").len();
    assert_eq!(first, 2);
    assert!(store.is_loaded());

    // источник больше не нужен: второе обращение отдаёт кэш
    let path = file.path().to_path_buf();
    drop(file);
    assert!(!path.exists());
    assert_eq!(store.get().expect("cached").len(), 2);
}

#[test]
fn dataset_store_reports_missing_source() {
    let store = DatasetStore::new("/definitely/not/here.csv", RoomTypePolicy::Strict);
    match store.get() {
        Err(HotelRevError::DataLoad(msg)) => assert!(msg.contains("/definitely/not/here.csv")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(!store.is_loaded());
}

#[test]
fn model_store_loads_linear_artifact() {
    let file = temp_file(&model_json(&FEATURE_NAMES, FEATURE_SCHEMA_VERSION));
    let store = ModelStore::new(file.path());
    let model = store.get().expect("model");
    assert_eq!(model.name(), "revenue-linear");

    let input = hotelrevlib::features::BookingInput::new(
        2,
        5000,
        500,
        chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        hotelrevlib::model::RoomType::Standard,
    )
    .unwrap();
    let fv = hotelrevlib::features::build(&input);
    // 100 + 500*1 + 5000*2 + 1*50
    assert_eq!(model.predict(&fv).unwrap(), 10650.0);
}

#[test]
fn model_with_reordered_features_is_rejected() {
    let mut reordered = FEATURE_NAMES;
    reordered.swap(0, 1);
    let file = temp_file(&model_json(&reordered, FEATURE_SCHEMA_VERSION));
    assert!(matches!(
        LinearRevenueModel::load(file.path()),
        Err(HotelRevError::ModelLoad(_))
    ));

    let file = temp_file(&model_json(&FEATURE_NAMES, FEATURE_SCHEMA_VERSION + 1));
    assert!(matches!(
        LinearRevenueModel::load(file.path()),
        Err(HotelRevError::ModelLoad(_))
    ));

    let file = temp_file("{ not json");
    assert!(matches!(
        LinearRevenueModel::load(file.path()),
        Err(HotelRevError::ModelLoad(_))
    ));
}

#[test]
fn bundled_sample_data_and_model_load() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
    let data = DatasetStore::new(root.join("Hotel_bookings_MLdata.csv"), RoomTypePolicy::Strict);
    let ds = data.get().expect("sample dataset");
    assert_eq!(ds.len(), 40);

    let models = ModelStore::new(root.join("revenue_model.json"));
    assert_eq!(models.get().expect("sample model").name(), "revenue-linear-v1");
}
