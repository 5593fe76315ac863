use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::LevelFilter;
use pfr::{Config, Pipeline};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

/// First season with fantasy data on the site
const FIRST_SEASON: u16 = 1970;

/// First draft listed on the site
const FIRST_DRAFT: u16 = 1936;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// TOML file overriding the default settings
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[arg(short = 'd', long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Seconds to wait after each request
    #[arg(long, global = true)]
    delay: Option<f64>,

    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape fantasy and advanced stats for a season
    Season {
        year: u16,

        /// Also write one file per position group
        #[arg(long)]
        split: bool,
    },
    /// Scrape the draft class and its college career stats
    Rookies {
        year: u16,

        /// Also write one file per position group
        #[arg(long)]
        split: bool,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(delay) = args.delay {
        if !delay.is_finite() || delay < 0.0 {
            bail!("Delay must be a finite, non-negative number of seconds");
        }
        config.season_delay_secs = delay;
        config.rookie_delay_secs = delay;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set the default level based on verbosity
    let default_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_config = ConfigBuilder::new().add_filter_allow_str("pfr").build();
    TermLogger::init(
        default_level,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    log::trace!("Args {:#?}", args);

    let config = load_config(&args)?;
    let pipeline = Pipeline::from_config(config)?;

    let written = match args.command {
        Command::Season { year, split } => {
            if year < FIRST_SEASON {
                bail!("No fantasy data before {}", FIRST_SEASON);
            }
            let stats = pipeline.player_stats(year)?;
            println!("{}", stats.head(Some(10)));
            pipeline.write_player_stats(year, &stats, split)?
        }
        Command::Rookies { year, split } => {
            if year < FIRST_DRAFT {
                bail!("No draft data before {}", FIRST_DRAFT);
            }
            let stats = pipeline.rookie_stats(year)?;
            println!("{}", stats.head(Some(10)));
            pipeline.write_rookie_stats(year, &stats, split)?
        }
    };

    println!(
        "Saved {}",
        written.iter().map(|path| path.display()).join(", ")
    );
    Ok(())
}
