use chrono::NaiveDate;
use ecowatt::features::{build_features, DEFAULT_LAG};
use ecowatt::generator::{SeasonalProfile, SignalGenerator};
use ecowatt::predictor::forecast_series;
use ecowatt::{Frequency, LagRegression};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("EcoWatt: Basic Forecasting Example");
    println!("==================================\n");

    // Two years of synthetic daily consumption
    let generator = SignalGenerator::new(SeasonalProfile::default())?;
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad start date")?;
    let series = generator.generate(start, 730, Frequency::Daily)?;

    if let Some(summary) = series.summary() {
        println!("{}", summary);
    }

    // Fit on one week of lags
    let (features, targets) = build_features(&series, DEFAULT_LAG)?;
    let model = LagRegression::fit(&features, &targets)?;
    println!("Trained on {} rows", model.training_rows());
    println!("Bias: {:.3}", model.bias());
    for (k, w) in model.weights().iter().enumerate() {
        println!("  lag {}: {:+.4}", k + 1, w);
    }

    // 30 days ahead, each prediction fed back as the next lag
    let forecast = forecast_series(&model, &series, 30, Frequency::Daily)?;
    println!("\nForecast:");
    for point in forecast.points() {
        println!("  {}  {:.2} kWh", point.timestamp.date(), point.value);
    }

    Ok(())
}
