use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_DATA_FILE: &str = "flavorhub.json";

#[derive(Parser)]
#[command(
    name = "flavorhub",
    about = "FlavorHub: recipe catalog with community ratings",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Recipe catalog file (defaults to ./flavorhub.json for local commands)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

impl Cli {
    pub fn data_file(&self) -> PathBuf {
        self.data
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List recipes, optionally filtered
    List(ListArgs),
    /// Show one recipe
    Show(ShowArgs),
    /// Add a recipe to the catalog
    Add(AddArgs),
    /// Submit a rating (1-5) for a recipe
    Rate(RateArgs),
    /// Remove a recipe
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the bind address from the config
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub difficulty: Option<String>,
    #[arg(long)]
    pub cuisine: Option<String>,
    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short = 'D', long, default_value = "")]
    pub description: String,
    /// Preparation time in minutes
    #[arg(long)]
    pub prep: Option<u32>,
    /// Cooking time in minutes
    #[arg(long)]
    pub cook: Option<u32>,
    #[arg(long)]
    pub servings: Option<u32>,
    #[arg(long)]
    pub difficulty: Option<String>,
    #[arg(long)]
    pub cuisine: Option<String>,
}

#[derive(Args)]
pub struct RateArgs {
    pub id: u64,
    #[arg(allow_negative_numbers = true)]
    pub rating: i64,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: u64,
}
