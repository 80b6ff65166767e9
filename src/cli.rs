//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use rxverify::config::Config;
use rxverify::output::OutputMode;

/// rxverify - Counterfeit and recall screening for drug packages
#[derive(Parser, Debug)]
#[command(
    name = "rxverify",
    version,
    about = "Counterfeit and recall screening for drug packages",
    long_about = "Check a drug package against authoritative sources using whatever \
                  identifiers are legible on it.\n\n\
                  Packages that cannot be corroborated are always reported as suspect."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.rxverify/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a drug package (exits 1 if the package is suspect)
    Verify(VerifyArgs),

    /// Show recorded scans, newest first
    History {
        /// Only scans by this user
        #[arg(short, long)]
        user: Option<String>,

        /// Show at most this many scans
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },

    /// Show version
    Version,
}

/// Identifiers read off the package
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Drug name as printed on the packaging
    #[arg(short, long)]
    pub name: Option<String>,

    /// National Drug Code
    #[arg(long)]
    pub ndc: Option<String>,

    /// Global Trade Item Number (from the barcode)
    #[arg(long)]
    pub gtin: Option<String>,

    /// Regulatory registration number (e.g. NAFDAC number)
    #[arg(short, long = "reg", visible_alias = "nafdac")]
    pub registration_number: Option<String>,

    /// JSON identifier set to start from ("-" for stdin); flags override its fields
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Barcode to record the scan under (defaults to the first identifier given)
    #[arg(short, long)]
    pub barcode: Option<String>,

    /// Acting user recorded with the scan
    #[arg(short, long)]
    pub user: Option<String>,

    /// Do not record the scan in history
    #[arg(long)]
    pub no_record: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config_path = cli.config.unwrap_or_else(Config::config_path);

    match cli.command {
        Some(Command::Verify(args)) => {
            let config = Config::load_from(&config_path)?;
            commands::verify(args, &config, output_mode)
        },
        Some(Command::History { user, limit }) => {
            let config = Config::load_from(&config_path)?;
            commands::history(user.as_deref(), limit, &config, output_mode)
        },
        Some(Command::Config { init }) => commands::config(&config_path, init, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("rxverify v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("rxverify v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'rxverify --help' for usage");
                println!("Run 'rxverify verify --name <drug>' to check a package");
            }
            Ok(())
        },
    }
}
