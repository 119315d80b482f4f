use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fiqlc::config::{get_config_path, AppConfig};
use fiqlc::fiql::{self, EntityKind};
use fiqlc::output;
use fiqlc::search::{self, FiqlEncoder, SearchClause};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fiqlc")]
#[command(about = "Translate between search clause lists and FIQL text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Entity kind the query targets
    #[arg(short, long, global = true, value_parser = parse_entity)]
    entity: Option<EntityKind>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON clause list into FIQL
    Encode {
        /// JSON file with an array of clauses (stdin when omitted)
        file: Option<PathBuf>,

        /// JSON file mapping attribute names to schema types
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Fail when no clause produces a condition
        #[arg(long)]
        strict: bool,
    },
    /// Decode FIQL into clauses
    Decode {
        /// FIQL text (stdin when omitted)
        query: Option<String>,

        /// Print clauses as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Parse FIQL strictly and report errors
    Check {
        /// FIQL text (stdin when omitted)
        query: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(entity) = cli.entity {
        config.entity = entity;
    }

    match cli.command {
        Commands::Encode { file, schema, strict } => {
            if let Some(schema) = schema {
                config.merge_schema_file(&schema)?;
            }
            let input = read_input_file(file.as_deref())?;
            let clauses: Vec<SearchClause> =
                serde_json::from_str(&input).context("Failed to parse clause list")?;

            let builder = config.entity.builder();
            let encoder = FiqlEncoder::new(builder.as_ref()).with_schema(&config.schema_types);
            match encoder.encode(&clauses) {
                Some(fiql) => println!("{}", fiql),
                None if strict => bail!("no clause produced a condition"),
                None => log::info!("No query: every entity matches"),
            }
        }
        Commands::Decode { query, json, no_color } => {
            let text = read_input_arg(query)?;
            let clauses = search::decode(text.as_str(), &config.parse_context());
            if json {
                output::print_clauses_json(&clauses)?;
            } else {
                output::print_clauses(&clauses, !no_color)?;
            }
        }
        Commands::Check { query } => {
            let text = read_input_arg(query)?;
            let condition = fiql::parse(&text, &config.parse_context()).context("Invalid FIQL")?;
            println!("{}", condition.to_text());
        }
        Commands::Config { save } => {
            let path = match cli.config {
                Some(path) => path,
                None => get_config_path()?,
            };
            if save {
                config.save(&path)?;
                log::info!("Saved config to {}", path.display());
            }
            println!("Config file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn parse_entity(s: &str) -> Result<EntityKind, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "user" => Ok(EntityKind::User),
        "group" => Ok(EntityKind::Group),
        "any_object" | "anyobject" => Ok(EntityKind::AnyObject),
        other => Err(format!("unknown entity kind '{}' (user, group, any-object)", other)),
    }
}

fn read_input_file(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display())),
        None => read_stdin(),
    }
}

fn read_input_arg(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    // Only the line ending; trailing spaces can belong to a value
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}
