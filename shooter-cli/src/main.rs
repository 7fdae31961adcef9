use anyhow::{Context, Result};
use clap::Parser;
use shooter_config::{ConfigLoader, LogFormat, ShooterConfig};
use shooter_http::HttpEngineClient;
use shooter_load::Runner;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands, ConfigCommands, RunArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut config = load_config(cli.config.as_ref())?;
            apply_run_overrides(&mut config, &args);
            config
                .validate_all()
                .context("Invalid configuration after applying command-line overrides")?;

            init_tracing(&config, cli.log_level.as_ref());
            run_load(config).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Generate => {
                println!("{}", ShooterConfig::generate_sample());
                Ok(())
            }
            ConfigCommands::Validate { config_file } => {
                match ConfigLoader::new().from_file(&config_file) {
                    Ok(_) => {
                        println!("Configuration is valid: {}", config_file.display());
                        Ok(())
                    }
                    Err(e) => {
                        eprintln!("Configuration is invalid: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        },
    }
}

/// Run both phases and print the summary.
///
/// Individual request failures are reported by the orchestrator and do not
/// fail the process; only startup errors produce a non-zero exit.
async fn run_load(config: ShooterConfig) -> Result<()> {
    let client =
        Arc::new(HttpEngineClient::new(&config.http).context("Failed to create engine client")?);

    info!(
        "Shooting at {} (mains {}..{}, short {}..{}, long {}..{})",
        config.http.base_url,
        config.load.main_range.start,
        config.load.main_range.end,
        config.load.short_range.start,
        config.load.short_range.end,
        config.load.long_range.start,
        config.load.long_range.end,
    );

    let runner = Runner::new(client, config.load);
    let summary = runner.run().await;

    println!("{}", summary);
    Ok(())
}

/// Load configuration from file or environment
fn load_config(config_path: Option<&PathBuf>) -> Result<ShooterConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => loader
            .from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => loader
            .from_env()
            .context("Failed to load config from environment"),
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_run_overrides(config: &mut ShooterConfig, args: &RunArgs) {
    if let Some(ref base_url) = args.base_url {
        config.http.base_url = base_url.clone();
    }

    if let Some(main_range) = args.main_range {
        config.load.main_range = main_range;
    }

    if let Some(short_range) = args.short_range {
        config.load.short_range = short_range;
    }

    if let Some(long_range) = args.long_range {
        config.load.long_range = long_range;
    }

    if let Some(delay_ms) = args.delay_ms {
        config.load.pacing.delay_ms = delay_ms;
    }

    if args.no_pacing {
        config.load.pacing.enabled = false;
    }

    if let Some(naming_scheme) = args.naming_scheme {
        config.load.naming_scheme = naming_scheme;
    }
}

/// Initialize tracing with environment variable override support
fn init_tracing(config: &ShooterConfig, log_level: Option<&String>) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str())),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Text => builder.init(),
    }
}
