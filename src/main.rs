mod power;
mod predict;
#[cfg(test)]
mod test_support;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::predict::{estimate_pass, GroundPoint, SatelliteId, SatelliteInfo, SearchWindow};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "overpass")]
#[command(about = "Approximate Earth-observation satellite overpass times")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
    /// Estimate the next closest approach over a location
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search window in hours (default 72, max 240)
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,
        /// Satellite key (landsat8, landsat9)
        #[arg(long)]
        sat: Option<String>,
        #[arg(long)]
        config: Option<String>,
    },
    /// List supported satellites
    Satellites,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Predict {
            lat,
            lon,
            hours,
            sat,
            config,
        } => predict(lat, lon, hours, sat.as_deref(), config.as_deref()).await,
        Commands::Satellites => satellites(),
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match path {
        None => Some(Config::default()),
        Some(path) => match Config::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                None
            }
        },
    }
}

async fn serve(config_path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn predict(
    lat: f64,
    lon: f64,
    hours: Option<f64>,
    sat: Option<&str>,
    config_path: Option<&str>,
) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let request = GroundPoint::from_degrees(lat, lon)
        .and_then(|target| Ok((target, SatelliteId::from_param(sat)?)));
    let (target, satellite) = match request {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let window = hours.map(SearchWindow::from_hours).unwrap_or_default();

    let source = config.tle.source();
    match estimate_pass(&source, satellite, target, Utc::now(), window).await {
        Ok(estimate) => match serde_json::to_string_pretty(&estimate) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error encoding result: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn satellites() -> ExitCode {
    for info in SatelliteId::ALL.into_iter().map(SatelliteInfo::from) {
        println!("{:<10} {:<10} NORAD {}", info.key, info.name, info.norad_id);
    }
    ExitCode::SUCCESS
}
