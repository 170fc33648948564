//! # ecowatt
//!
//! Command-line entry points: generate synthetic data, train the lag
//! regression, forecast and evaluate.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ecowatt::config::{EcoWattConfig, DEFAULT_CONFIG_FILE};
use ecowatt::data::{save_forecast_csv, save_series_csv};
use ecowatt::metrics::{evaluate_holdout, evaluate_recursive_holdout};
use ecowatt::telemetry::init_tracing;
use ecowatt::{ForecastOutcome, ModelStore, Session};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ecowatt")]
#[command(about = "Energy consumption forecasting CLI", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic consumption series
    Generate {
        /// Number of periods to generate
        #[arg(short, long)]
        periods: Option<usize>,

        /// First date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// Noise seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Train the lag regression on a CSV series and store it
    Train {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Model file
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Forecast past the end of a CSV series with the stored model
    Forecast {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Number of steps to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score the model on a chronological holdout split
    Evaluate {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Share of rows used for training
        #[arg(long)]
        train_ratio: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EcoWattConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    if cli.json_logs {
        config.logging.json = true;
    }
    init_tracing(&config.logging);

    match cli.command {
        Commands::Generate {
            periods,
            start,
            seed,
            output,
        } => {
            if let Some(periods) = periods {
                config.generator.periods = periods;
            }
            if let Some(start) = start {
                config.generator.start_date = start;
            }
            if let Some(seed) = seed {
                config.generator.profile.seed = seed;
            }
            let output = output.unwrap_or_else(|| config.storage.data_path.clone());

            let mut session = Session::new(config);
            let series = session.generate()?;
            save_series_csv(series, &output)?;
            println!("Synthetic energy data generated and saved to {}", output.display());
            if let Some(summary) = session.summary() {
                print!("{}", summary);
            }
        }
        Commands::Train { input, model } => {
            let input = input.unwrap_or_else(|| config.storage.data_path.clone());
            let store = ModelStore::new(model.unwrap_or_else(|| config.storage.model_path.clone()));

            let mut session = Session::new(config);
            session
                .load_csv(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let trained = session.train()?;
            println!(
                "Model trained on {} rows (lag {}, rank {}).",
                trained.training_rows(),
                trained.lag(),
                trained.rank()
            );
            session.save_model(&store)?;
            println!("Model saved to {}", store.path().display());
        }
        Commands::Forecast {
            input,
            model,
            horizon,
            output,
        } => {
            let input = input.unwrap_or_else(|| config.storage.data_path.clone());
            let store = ModelStore::new(model.unwrap_or_else(|| config.storage.model_path.clone()));
            let horizon = horizon.unwrap_or(config.forecast.horizon);
            let output = output.unwrap_or_else(|| config.storage.forecast_path.clone());

            let mut session = Session::start(config, &store)?;
            session
                .load_csv(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            match session.forecast(horizon)? {
                ForecastOutcome::Ready(forecast) => {
                    save_forecast_csv(&forecast, &output)?;
                    for point in forecast.points() {
                        println!("{}  {:.2} kWh", point.timestamp.date(), point.value);
                    }
                    println!("Forecast saved to {}", output.display());
                }
                ForecastOutcome::ModelMissing => {
                    bail!(
                        "no trained model at {}; run `ecowatt train` first",
                        store.path().display()
                    );
                }
            }
        }
        Commands::Evaluate { input, train_ratio } => {
            let input = input.unwrap_or_else(|| config.storage.data_path.clone());
            let ratio = train_ratio.unwrap_or(config.model.train_ratio);
            let lag = config.model.lag;
            let options = config.model.fit_options();

            let mut session = Session::new(config);
            let series = session
                .load_csv(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let one_step = evaluate_holdout(series, lag, ratio, options)?;
            println!("Mean Squared Error: {:.2}", one_step.accuracy.mse);
            println!(
                "One-step holdout ({} train / {} test rows):",
                one_step.train_rows, one_step.test_rows
            );
            print!("{}", one_step.accuracy);

            let recursive = evaluate_recursive_holdout(series, lag, ratio, options)?;
            println!("Recursive holdout ({} steps):", recursive.test_rows);
            print!("{}", recursive.accuracy);
            info!(
                one_step_mse = one_step.accuracy.mse,
                recursive_mse = recursive.accuracy.mse,
                "evaluation complete"
            );
        }
    }

    Ok(())
}
