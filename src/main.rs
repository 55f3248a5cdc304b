//! NBA season statistics CLI
//!
//! Builds per-team feature tables from season exports and renders the
//! season comparison charts.

use clap::{Parser, Subcommand};
use hoops::{Config, Result};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "NBA team statistics: win rate, age, pace and three-point trends", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "hoops.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the three-season report and write its charts (default)
    Report,
    /// Print one season's team feature table
    Season {
        /// Season label, e.g. 2018-19
        season: String,
        /// Advanced table column to include (repeatable, in order)
        #[arg(long = "advanced")]
        advanced: Vec<usize>,
        /// Per-game table column to include (repeatable, in order)
        #[arg(long = "per-game")]
        per_game: Vec<usize>,
        /// Leave out the leading win percentage
        #[arg(long)]
        no_win_rate: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Print average win percentage per age bracket for a season
    Brackets {
        /// Season label, e.g. 2018-19
        season: String,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Write a default config file
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config, falling back to defaults
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

    let result = match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => commands::report(&config),
        Commands::Season {
            season,
            advanced,
            per_game,
            no_win_rate,
            format,
        } => commands::season(&config, &season, advanced, per_game, !no_win_rate, format),
        Commands::Brackets { season, format } => commands::brackets(&config, &season, format),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use hoops::features::age_brackets::{group_by_age, summarize_groups, BracketField};
    use hoops::report::{self, format_brackets, format_feature_map};
    use hoops::{SeasonLabel, SeasonLoader, SeasonRequest, TeamFeatureMap};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);
        println!(
            "Place season exports in {}/ and run 'hoops report'",
            config.data.data_dir.display()
        );
        Ok(())
    }

    pub fn report(config: &Config) -> Result<()> {
        println!("NBA season comparison\n");

        let output = report::run(config)?;

        for (season, map) in &output.seasons {
            println!("Teams in {} season:", season);
            print!("{}", format_feature_map(map));
            println!();
        }

        println!("Average winning percentage by age ({}):", report::MODERN_SEASON);
        print!("{}", format_brackets(&output.brackets));
        println!();

        println!("Charts:");
        for path in &output.charts {
            println!("  {}", path.display());
        }

        if let Some(features) = output.spotlight() {
            println!("\n{}: {:?}", report::SPOTLIGHT_TEAM, features);
        }

        Ok(())
    }

    pub fn season(
        config: &Config,
        season: &str,
        advanced: Vec<usize>,
        per_game: Vec<usize>,
        win_rate: bool,
        format: OutputFormat,
    ) -> Result<()> {
        let request = SeasonRequest::new(SeasonLabel::parse(season)?)
            .with_advanced(&advanced)
            .with_per_game(&per_game)
            .with_win_rate(win_rate);
        let map = SeasonLoader::from_config(config).assemble_season(&request)?;

        match format {
            OutputFormat::Table => print!("{}", format_feature_map(&map)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&map)?),
            OutputFormat::Csv => write_csv(&map)?,
        }
        Ok(())
    }

    pub fn brackets(config: &Config, season: &str, format: OutputFormat) -> Result<()> {
        let request = SeasonRequest::new(SeasonLabel::parse(season)?)
            .with_advanced(&[hoops::data::schema::advanced::AGE])
            .with_win_rate(true);
        let map = SeasonLoader::from_config(config).assemble_season(&request)?;

        // [win %, age]
        let groups = group_by_age(&map, 0, 1, &config.brackets)?;
        let summary = summarize_groups(&groups, BracketField::Value)?;

        match format {
            OutputFormat::Table => print!("{}", format_brackets(&summary)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                writer.write_record(["ages", "average"])?;
                for (label, average) in summary.iter() {
                    writer.write_record([label.to_string(), average.to_string()])?;
                }
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn write_csv(map: &TeamFeatureMap) -> Result<()> {
        let mut writer = csv::Writer::from_writer(std::io::stdout());

        let mut header = vec!["Team".to_string()];
        header.extend(map.columns().iter().map(|c| c.label.clone()));
        writer.write_record(&header)?;

        for team in map.iter() {
            let mut record = vec![team.team.clone()];
            record.extend(team.features.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
