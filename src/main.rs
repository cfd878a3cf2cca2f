//! Toucan MVP calculator CLI
//!
//! Processes a directory of match files and announces the tournament MVP.

use clap::{Parser, Subcommand};
use toucan::report::OutputFormat;
use toucan::{Config, Result};

#[derive(Parser)]
#[command(name = "toucan")]
#[command(about = "Most Valuable Player calculator for Toucan tournaments", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "toucan.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a tournament and show its MVP
    Mvp {
        /// Directory holding one file per match (defaults to the configured data_dir)
        dir: Option<String>,
        /// Tournament name
        #[arg(long)]
        name: Option<String>,
        /// Output format: table, json or csv
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Process a tournament and list every player by total points
    Players {
        /// Directory holding one file per match (defaults to the configured data_dir)
        dir: Option<String>,
        /// Tournament name
        #[arg(long)]
        name: Option<String>,
        /// Output format: table, json or csv
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Show the scoring rules of every discipline
    Disciplines,
    /// Write a default config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Mvp { dir, name, format } => commands::mvp(&config, dir, name, format),
        Commands::Players { dir, name, format } => {
            commands::players(&config, dir, name, format)
        }
        Commands::Disciplines => commands::disciplines(),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use toucan::data::DirectoryLoader;
    use toucan::{report, Discipline, MvpError, Tournament};

    fn run_tournament(
        config: &Config,
        dir: Option<String>,
        name: Option<String>,
    ) -> Result<Tournament> {
        let dir = dir.unwrap_or_else(|| config.tournament.data_dir.clone());
        let name = name.unwrap_or_else(|| config.tournament.name.clone());

        let mut tournament =
            Tournament::new(name).with_winner_bonus(config.scoring.winner_bonus);
        tournament.process_source(&DirectoryLoader::new(&dir))?;
        Ok(tournament)
    }

    fn resolve_format(config: &Config, format: Option<OutputFormat>) -> Result<OutputFormat> {
        match format {
            Some(f) => Ok(f),
            None => config.report.format.parse().map_err(MvpError::Config),
        }
    }

    pub fn mvp(
        config: &Config,
        dir: Option<String>,
        name: Option<String>,
        format: Option<OutputFormat>,
    ) -> Result<()> {
        let format = resolve_format(config, format)?;
        let tournament = run_tournament(config, dir, name)?;
        println!("{}", report::render_mvp(&tournament, format)?);
        Ok(())
    }

    pub fn players(
        config: &Config,
        dir: Option<String>,
        name: Option<String>,
        format: Option<OutputFormat>,
    ) -> Result<()> {
        let format = resolve_format(config, format)?;
        let tournament = run_tournament(config, dir, name)?;
        println!("{}", report::render_standings(&tournament, format)?);
        Ok(())
    }

    pub fn disciplines() -> Result<()> {
        for discipline in Discipline::ALL {
            println!("{} ({} marks per player)", discipline, discipline.stat_count());
            for position in discipline.positions() {
                println!(
                    "  {}: multipliers {:?}, extra points {}",
                    position,
                    discipline.multipliers(position).unwrap_or_default(),
                    discipline.position_bonus(position)
                );
            }
            let contribution: Vec<String> = discipline
                .score_contribution()
                .iter()
                .map(|(idx, add)| format!("{}mark[{}]", if *add { "+" } else { "-" }, idx))
                .collect();
            println!("  team score: {}", contribution.join(" "));
        }
        Ok(())
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all(&config.tournament.data_dir)?;
        println!("Created {}/ directory", config.tournament.data_dir);

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!(
            "  2. Drop one file per match into {}/",
            config.tournament.data_dir
        );
        println!("  3. Run 'toucan mvp' to find the Most Valuable Player");

        Ok(())
    }
}
