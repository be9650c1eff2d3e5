//! Saved calculation workflow against a real store file.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pse_app::{
    AppConfig, AppError, ErrorKind, OrificeSize, SaveRequest, calculate, delete_calculation,
    save_calculation, view_calculation,
};
use pse_core::numeric::relative_diff;
use pse_records::RecordStore;

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn save_request(title: &str) -> SaveRequest {
    SaveRequest {
        user_name: "Sam".to_string(),
        calculation_title: title.to_string(),
        ..SaveRequest::default()
    }
}

#[test]
fn save_view_and_recalculate() {
    let path = temp_dir("pse_app_view").join("saved_calculations.json");
    let mut store = RecordStore::open(&path);

    let mut request = save_request("Meter run flange");
    request.flow.release.p0 = 250.0;
    request.flow.orifice = OrificeSize::Diameter {
        value: 3.0,
        unit: "mm".to_string(),
    };
    let saved = save_calculation(&mut store, &request).unwrap();
    assert!(saved.warning.is_none());
    assert_eq!(saved.record.inputs.area_unit, "mm²");

    let reopened = RecordStore::open(&path);
    let view = view_calculation(&reopened, &saved.record.id).unwrap();
    assert_eq!(view.calculation_title, "Meter run flange");
    assert_eq!(view.request.release.p0, 250.0);

    let original = calculate(&request.flow).unwrap();
    let restored = calculate(&view.request).unwrap();
    assert!(relative_diff(restored.mass_flow_kg_s, original.mass_flow_kg_s) < 1e-12);
}

#[test]
fn invalid_save_stores_nothing() {
    let path = temp_dir("pse_app_invalid").join("saved_calculations.json");
    let mut store = RecordStore::open(&path);

    let err = save_calculation(&mut store, &save_request("   ")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);
    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn delete_removes_only_that_record() {
    let path = temp_dir("pse_app_delete").join("saved_calculations.json");
    let mut store = RecordStore::open(&path);
    let first = save_calculation(&mut store, &save_request("first")).unwrap();
    let second = save_calculation(&mut store, &save_request("second")).unwrap();

    let deleted = delete_calculation(&mut store, &first.record.id).unwrap();
    assert_eq!(deleted.removed.len(), 1);
    assert_eq!(deleted.removed[0].inputs.calculation_title, "first");
    assert!(deleted.warning.is_none());

    let reopened = RecordStore::open(&path);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.list()[0].id, second.record.id);

    let err = delete_calculation(&mut store, &first.record.id).unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(_)));
    assert!(matches!(
        view_calculation(&store, "missing"),
        Err(AppError::RecordNotFound(_))
    ));
}

#[test]
fn unwritable_store_warns_but_keeps_record() {
    let dir = temp_dir("pse_app_unwritable");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, "").unwrap();
    let mut store = RecordStore::open(blocker.join("saved_calculations.json"));

    let saved = save_calculation(&mut store, &save_request("kept in memory")).unwrap();
    assert!(saved.warning.is_some());
    assert_eq!(store.len(), 1);
    assert!(view_calculation(&store, &saved.record.id).is_ok());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = temp_dir("pse_app_config");
    let config_path = dir.join("pse.yaml");
    fs::write(&config_path, "store_path: /var/lib/pse/calcs.json\n").unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(config.store_path, PathBuf::from("/var/lib/pse/calcs.json"));
    assert_eq!(config.bind, "127.0.0.1:8050");

    fs::write(&config_path, "bind: [not, a, string]\n").unwrap();
    assert!(matches!(
        AppConfig::from_file(&config_path),
        Err(AppError::ConfigParse { .. })
    ));
    assert!(matches!(
        AppConfig::from_file(&dir.join("absent.yaml")),
        Err(AppError::ConfigFileRead { .. })
    ));
}
