//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_dataset_adapter::CsvDatasetAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_dataset_adapter::JsonDatasetAdapter;
use crate::adapters::trace_observer::TraceObserver;
use crate::domain::candle::{chronological, Candle};
use crate::domain::config::StrategyConfig;
use crate::domain::error::WavetraderError;
use crate::domain::indicator::compute_indicators;
use crate::domain::simulation::{simulate, simulate_with_observer};
use crate::domain::trade::TradeHistory;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "wavetrader", about = "RSI/MACD wave-reversal trading simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a trading simulation over a candle dataset
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory holding <ASSET>.json / <ASSET>.csv datasets
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        asset: String,
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,
        /// Emit per-candle state snapshots through the trace observer
        #[arg(long)]
        trace: bool,
    },
    /// Dump the aligned indicator arrays as JSON
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        asset: String,
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,
    },
    /// Validate a strategy configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Simulate {
            config,
            data,
            asset,
            format,
            trace,
        } => run_simulate(&config, &data, &asset, format, trace),
        Command::Indicators {
            config,
            data,
            asset,
            format,
        } => run_indicators(&config, &data, &asset, format),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: &WavetraderError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn load_strategy_config(path: &Path) -> Result<StrategyConfig, WavetraderError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    let config = adapter.strategy_config()?;
    config.validate()?;
    Ok(config)
}

fn load_candles(
    data: &Path,
    asset: &str,
    format: DataFormat,
) -> Result<Vec<Candle>, WavetraderError> {
    match format {
        DataFormat::Json => JsonDatasetAdapter::new(data.to_path_buf()).load_candles(asset),
        DataFormat::Csv => CsvDatasetAdapter::new(data.to_path_buf()).load_candles(asset),
    }
}

fn run_simulate(
    config_path: &Path,
    data: &Path,
    asset: &str,
    format: DataFormat,
    trace: bool,
) -> ExitCode {
    let config = match load_strategy_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let candles = match load_candles(data, asset, format) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let result = if trace {
        let mut observer = TraceObserver;
        simulate_with_observer(&candles, &config, &mut observer)
    } else {
        simulate(&candles, &config)
    };

    match result {
        Ok(history) => {
            print_history(asset, &history);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn print_history(asset: &str, history: &TradeHistory) {
    println!(
        "{:>4}  {:<19}  {:<4}  {:>16}  {:>12}  {:>14}  {:>12}  {}",
        "ID", "TIMESTAMP", "SIDE", "AMOUNT", "PRICE", "NOTIONAL", "P/L", "FILL"
    );
    for trade in &history.trades {
        let pl = trade
            .profit_loss
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let fill = if trade.partial_fill { "partial" } else { "full" };
        println!(
            "{:>4}  {}  {:<4}  {:>16.8}  {:>12.4}  {:>14.2}  {:>12}  {}",
            trade.id,
            trade.timestamp.format("%Y-%m-%d %H:%M:%S"),
            trade.action,
            trade.coin_amount,
            trade.price,
            trade.notional,
            pl,
            fill,
        );
    }

    println!();
    println!("asset:            {asset}");
    println!("trades:           {}", history.trades.len());
    println!(
        "wins / losses:    {} / {}",
        history.win_count, history.loss_count
    );
    println!("realized P/L:     {:.2}", history.total_profit_loss);
    println!("ending cash:      {:.2}", history.ending_cash_balance);
    println!("ending position:  {:.8}", history.ending_coin_balance);
}

fn run_indicators(config_path: &Path, data: &Path, asset: &str, format: DataFormat) -> ExitCode {
    let config = match load_strategy_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let candles = match load_candles(data, asset, format) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let ordered = chronological(&candles);
    let series = match compute_indicators(&ordered, &config) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    match serde_json::to_string_pretty(&series) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize indicators: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    match load_strategy_config(config_path) {
        Ok(_) => {
            println!("configuration OK");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
