//! Command-line interface implementation for quire.
//! Provides argument parsing and help text formatting using clap.

use crate::corpus::SortOrder;
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for quire.
#[derive(Parser, Debug)]
#[command(author, version, about = "quire: compose article pages from a markup template", long_about = None)]
pub struct Args {
    /// Path to the markup template
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Article manifest file, or a directory containing quire.json/quire.yml/quire.yaml
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Show only the article with this source identifier.
    /// Unknown identifiers are ignored and every article is shown.
    #[arg(short = 'c', long, value_name = "SOURCE")]
    pub force_article: Option<String>,

    /// Article ordering
    #[arg(long, value_enum, default_value_t = SortOrder::Date)]
    pub sort: SortOrder,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
