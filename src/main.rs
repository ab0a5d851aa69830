//! Stock RNN CLI
//!
//! Trains an LSTM on a daily price CSV, reports the test error and forecasts
//! the coming business days.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stock_rnn::{pipeline, PipelineConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stock-rnn")]
#[command(about = "LSTM stock price prediction and forecasting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train, evaluate and forecast
    Run {
        /// CSV file with Date and Adj Close columns
        #[arg(short, long)]
        data: PathBuf,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Prices per input window
        #[arg(short, long)]
        window: Option<usize>,

        /// Training epochs
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Training batch size
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Business days to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Random seed for splits, weights and shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Train on raw prices instead of min-max scaled ones
        #[arg(long)]
        no_scale: bool,

        /// Save the fitted model to this path
        #[arg(long)]
        save_model: Option<PathBuf>,

        /// Write predictions, forecast and loss history here
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print summary statistics of a CSV file
    Describe {
        /// CSV file to summarise
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Forecast with a saved model
    Forecast {
        /// CSV file with Date and Adj Close columns
        #[arg(short, long)]
        data: PathBuf,

        /// Path the model was saved to
        #[arg(short, long)]
        model: PathBuf,

        /// Business days to forecast
        #[arg(long, default_value = "90")]
        horizon: usize,

        /// Write the forecast CSV here
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            data,
            config,
            window,
            epochs,
            batch_size,
            horizon,
            seed,
            no_scale,
            save_model,
            output_dir,
        } => {
            let mut config = match config {
                Some(path) => PipelineConfig::from_file(path)?,
                None => PipelineConfig::default(),
            };
            if let Some(window) = window {
                config.window_size = window;
            }
            if let Some(epochs) = epochs {
                config.training.epochs = epochs;
            }
            if let Some(batch_size) = batch_size {
                config.training.batch_size = batch_size;
            }
            if let Some(horizon) = horizon {
                config.horizon = horizon;
            }
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            if no_scale {
                config.scale = false;
            }
            if save_model.is_some() {
                config.save_model = save_model;
            }
            if output_dir.is_some() {
                config.output_dir = output_dir;
            }

            info!("Running pipeline on {}", data.display());
            let report = pipeline::run(&config, &data)?;

            println!("\n{} Results", report.summary.ticker);
            println!("{:-<50}", "");
            println!(
                "Window pairs:   {} (train {}, test {})",
                report.pairs, report.train_pairs, report.test_pairs
            );
            if let Some(loss) = report.history.final_loss() {
                println!("Final loss:     {:.6}", loss);
            }
            if let Some(val_loss) = report.history.final_val_loss() {
                println!("Final val loss: {:.6}", val_loss);
            }
            match report.evaluation.mse {
                Some(mse) => println!("Test MSE:       {:.4}", mse),
                None => println!("Test MSE:       n/a"),
            }
            if let Some(rmse) = report.evaluation.rmse {
                println!("Test RMSE:      {:.4}", rmse);
            }
            if let Some(mape) = report.evaluation.mape {
                println!("Test MAPE:      {:.2}%", mape);
            }
            if let (Some(date), Some(price)) =
                (report.forecast.dates.last(), report.forecast.prices.last())
            {
                println!("Forecast {}: {:.2}", date, price);
            }
        }

        Commands::Describe { data } => {
            let summary = pipeline::describe_file(&data)?;
            println!("{}", summary);
        }

        Commands::Forecast {
            data,
            model,
            horizon,
            output_dir,
        } => {
            let config = PipelineConfig {
                horizon,
                output_dir,
                ..Default::default()
            };
            let forecast = pipeline::forecast_from_saved(&config, &data, &model)?;

            println!("\n{} Forecast ({} business days)", forecast.ticker, forecast.len());
            println!("{:-<30}", "");
            for (date, price) in forecast.points() {
                println!("{}  {:>12.4}", date, price);
            }
        }
    }

    Ok(())
}
