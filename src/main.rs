use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use flydays_analysis::Thresholds;
use flydays_core::{AppError, Config, ConfigError};
use flydays_weather::{Analysis, FlightDayService, Location};

#[derive(Parser)]
#[command(name = "flydays")]
#[command(about = "How many days a year can you fly a drone here?", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a place in Norway
    Geocode {
        place: String,
        #[arg(long)]
        json: bool,
    },
    /// Count historical flight days for a place or a coordinate pair
    Analyze(AnalyzeArgs),
    /// Show the effective configuration
    Config {
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Place name, resolved through geocoding
    #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
    place: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Maximum daily precipitation in mm
    #[arg(long, value_name = "MM")]
    max_rain: Option<f64>,

    /// Maximum mean wind speed in m/s
    #[arg(long, value_name = "MS")]
    max_wind: Option<f64>,

    /// Maximum wind gust in m/s
    #[arg(long, value_name = "MS")]
    max_gusts: Option<f64>,

    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    fn thresholds(&self, config: &Config) -> Thresholds {
        let defaults = Thresholds::from(config.thresholds);
        Thresholds::new(
            self.max_rain.unwrap_or(defaults.max_rain),
            self.max_wind.unwrap_or(defaults.max_wind),
            self.max_gusts.unwrap_or(defaults.max_wind_gusts),
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = flydays_core::init(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e.user_message());
            eprintln!("  {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    if let Commands::Config { validate } = cli.command {
        let config_path = match cli.config {
            Some(path) => path,
            None => Config::default_path()?,
        };
        return show_config(&config_path, validate);
    }

    let (config, _) = Config::load_validated(cli.config.as_deref())
        .map_err(|e| AppError::Config(ConfigError::Invalid(format!("{:#}", e))))?;
    let service = FlightDayService::from_config(&config)?;

    match cli.command {
        Commands::Geocode { place, json } => {
            let matches = service.geocode(&place).await?;
            if json {
                print_json(&matches)?;
            } else if matches.is_empty() {
                println!("No matches for \"{}\" in Norway", place.trim());
            } else {
                for m in &matches {
                    println!("{:>9.4} {:>9.4}  {}", m.latitude, m.longitude, m.display_name);
                }
            }
        }
        Commands::Analyze(args) => {
            let thresholds = args.thresholds(&config);
            let analysis = match (&args.place, args.lat, args.lon) {
                (Some(place), _, _) => service.analyze_place(place, thresholds).await?,
                (None, Some(lat), Some(lon)) => {
                    service.analyze(&Location::new(lat, lon), thresholds).await?
                }
                _ => {
                    return Err(ConfigError::Invalid(
                        "either --place or both --lat and --lon are required".to_string(),
                    )
                    .into())
                }
            };

            if args.json {
                print_json(&analysis.report())?;
            } else {
                print_summary(&analysis);
            }
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn show_config(path: &std::path::Path, validate: bool) -> Result<(), AppError> {
    let config = Config::load_from(path)
        .map_err(|e| AppError::Config(ConfigError::ParseError(format!("{:#}", e))))?;
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    println!("# {}", path.display());
    println!("{}", contents.trim_end());

    if validate {
        let validation = config.validate();
        println!();
        for warning in &validation.warnings {
            println!("warning: {}", warning);
        }
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }
        println!("Configuration is valid");
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", json);
    Ok(())
}

fn print_summary(analysis: &Analysis) {
    let result = &analysis.result;
    let t = &result.thresholds;

    println!(
        "{} ({:.4}, {:.4})",
        analysis.location.label(),
        analysis.location.latitude,
        analysis.location.longitude
    );
    println!(
        "Period: {} to {} ({} days)",
        analysis.window.start_param(),
        analysis.window.end_param(),
        analysis.window.days()
    );
    println!(
        "Limits: rain <= {} mm, wind <= {} m/s, gusts <= {} m/s",
        t.max_rain, t.max_wind, t.max_wind_gusts
    );
    println!();
    println!(
        "Flight days per year: {} (± {})",
        result.average_flight_days, result.standard_deviation
    );
    println!();
    println!(
        "{:>6} {:>7} {:>6} {:>10} {:>9} {:>9} {:>9}",
        "Year", "Flyable", "Days", "Rain (mm)", "mm/day", "Wind m/s", "Gust m/s"
    );
    for year in &result.yearly_statistics {
        println!(
            "{:>6} {:>7} {:>6} {:>10.1} {:>9.2} {:>9.1} {:>9.1}",
            year.year,
            year.flight_days,
            year.total_days,
            year.total_rain,
            year.mean_daily_rain,
            year.mean_wind_speed,
            year.mean_wind_gusts
        );
    }
}
