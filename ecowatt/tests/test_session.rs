use ecowatt::{EcoWattConfig, EcoWattError, ForecastOutcome, LagRegression, ModelStore, Session};
use tempfile::tempdir;

fn small_config() -> EcoWattConfig {
    let mut config = EcoWattConfig::default();
    config.generator.periods = 120;
    config
}

#[test]
fn test_forecast_before_training() {
    let mut session = Session::new(small_config());
    session.generate().unwrap();

    assert_eq!(session.forecast(10).unwrap(), ForecastOutcome::ModelMissing);
    assert!(session.last_forecast().is_none());
}

#[test]
fn test_train_without_series() {
    let mut session = Session::new(small_config());
    assert!(matches!(session.train(), Err(EcoWattError::MissingSeries)));
}

#[test]
fn test_forecast_with_model_but_no_series() {
    let mut session = Session::new(small_config());
    session.install_model(LagRegression::from_parts(vec![1.0], 0.0).unwrap());
    assert!(matches!(session.forecast(3), Err(EcoWattError::MissingSeries)));
}

#[test]
fn test_generate_train_forecast() {
    let mut session = Session::new(small_config());
    assert_eq!(session.generate().unwrap().len(), 120);

    let model = session.train().unwrap();
    assert_eq!(model.lag(), 7);
    assert_eq!(model.training_rows(), 113);

    let outcome = session.forecast(30).unwrap();
    assert!(outcome.is_ready());
    let forecast = outcome.ready().unwrap();
    assert_eq!(forecast.horizon(), 30);
    assert_eq!(session.last_forecast(), Some(&forecast));
}

#[test]
fn test_new_data_clears_forecast_but_keeps_model() {
    let mut session = Session::new(small_config());
    let series = session.generate().unwrap().clone();
    session.train().unwrap();
    session.forecast(5).unwrap();
    assert!(session.last_forecast().is_some());

    session.ingest(series);

    assert!(session.last_forecast().is_none());
    assert!(session.model().is_some());
}

#[test]
fn test_model_survives_through_store() {
    let dir = tempdir().unwrap();
    let store = ModelStore::new(dir.path().join("energy_model.json"));

    let mut first = Session::start(small_config(), &store).unwrap();
    assert!(first.model().is_none());
    assert!(!first.save_model(&store).unwrap());

    first.generate().unwrap();
    first.train().unwrap();
    assert!(first.save_model(&store).unwrap());

    let second = Session::start(small_config(), &store).unwrap();
    let (saved, loaded) = (first.model().unwrap(), second.model().unwrap());
    assert_eq!(loaded.lag(), saved.lag());
    assert_eq!(loaded.training_rows(), saved.training_rows());
    assert!((loaded.bias() - saved.bias()).abs() < 1e-9);
}

#[test]
fn test_summary_follows_series() {
    let mut session = Session::new(small_config());
    assert!(session.summary().is_none());
    session.generate().unwrap();
    assert_eq!(session.summary().unwrap().points, 120);
}
