use chrono::NaiveDate;
use ecowatt::generator::{SeasonalProfile, SignalGenerator};
use ecowatt::metrics::{evaluate_holdout, evaluate_recursive_holdout};
use ecowatt::{FitOptions, Frequency};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("EcoWatt: Hourly Holdout Example");
    println!("===============================\n");

    // The composition model is expressed in steps, so an hourly series
    // repeats its "weekly" cycle every 7 hours
    let profile = SeasonalProfile {
        noise_std: 2.0,
        ..SeasonalProfile::default()
    };
    let generator = SignalGenerator::new(profile)?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad start date")?;
    let series = generator.generate(start, 24 * 60, Frequency::Hourly)?;

    for lag in [1, 7, 24] {
        let one_step = evaluate_holdout(&series, lag, 0.8, FitOptions::default())?;
        let recursive = evaluate_recursive_holdout(&series, lag, 0.8, FitOptions::default())?;
        println!(
            "lag {:>2}: one-step MSE {:>8.3}, recursive MSE {:>8.3} over {} steps",
            lag, one_step.accuracy.mse, recursive.accuracy.mse, recursive.test_rows
        );
    }

    Ok(())
}
