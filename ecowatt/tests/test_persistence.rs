use approx::assert_abs_diff_eq;
use ecowatt::features::build_features_from_values;
use ecowatt::{EcoWattError, LagRegression, ModelStore};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn assert_same_model(a: &LagRegression, b: &LagRegression) {
    assert_eq!(a.lag(), b.lag());
    assert_eq!(a.rank(), b.rank());
    assert_eq!(a.training_rows(), b.training_rows());
    assert_abs_diff_eq!(a.bias(), b.bias(), epsilon = 1e-12);
    for (x, y) in a.weights().iter().zip(b.weights()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
}

fn trained_model() -> LagRegression {
    let values: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin() * 10.0 + 50.0).collect();
    let (features, targets) = build_features_from_values(&values, 3).unwrap();
    LagRegression::fit(&features, &targets).unwrap()
}

#[test]
fn test_missing_file_loads_nothing() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("energy_model.json"));

    assert!(!store.exists());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("models").join("energy_model.json"));
    let model = trained_model();

    store.save(&model).unwrap();

    assert!(store.exists());
    let loaded = store.load().unwrap().unwrap();
    assert_same_model(&loaded, &model);
}

#[test]
fn test_save_replaces_previous_model() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("energy_model.json"));

    store.save(&trained_model()).unwrap();
    let replacement = LagRegression::from_parts(vec![1.0], 0.0).unwrap();
    store.save(&replacement).unwrap();

    assert_eq!(store.load().unwrap(), Some(replacement));
}

#[test]
fn test_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("energy_model.json");
    let store = ModelStore::new(&path);

    fs::write(&path, "not a model").unwrap();
    assert!(matches!(store.load(), Err(EcoWattError::Serialization(_))));

    fs::write(
        &path,
        r#"{"weights":[],"bias":1.0,"rank":0,"training_rows":0}"#,
    )
    .unwrap();
    assert!(matches!(store.load(), Err(EcoWattError::InvalidArgument(_))));
}
