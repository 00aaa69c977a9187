use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use exobio_cli::commands::estimate::{handle_estimate, EstimateRequest};
use exobio_cli::commands::genera::handle_genera;
use exobio_cli::commands::validate::handle_validate;
use exobio_cli::commands::{catalog_path, load_catalog};
use exobio_cli::output::{to_json, OutputFormat, TextRenderer};
use exobio_cli::terminal::{supports_unicode, ColorPalette};
use exobio_lib::RegionId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exobiology catalog and value estimate utilities")]
struct Cli {
    /// Catalog JSON to use instead of the embedded one (also EXOBIO_CATALOG).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog genera, or the species of one genus.
    Genera {
        /// Genus id or display name.
        #[arg(long)]
        genus: Option<String>,
    },
    /// Estimate biological values for the bodies of a system snapshot.
    Estimate(EstimateArgs),
    /// Load and validate a catalog, reporting its size.
    Validate,
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// System snapshot JSON file.
    #[arg(long)]
    snapshot: PathBuf,
    /// Only estimate this body (matched by name, case-insensitive).
    #[arg(long)]
    body: Option<String>,
    /// Only estimate this genus.
    #[arg(long)]
    genus: Option<String>,
    /// Region id overriding the snapshot's region.
    #[arg(long)]
    region: Option<RegionId>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let catalog_path = catalog_path(cli.catalog.as_deref());
    let catalog = load_catalog(catalog_path.as_deref())?;
    let renderer = TextRenderer::new(ColorPalette::for_flag(cli.no_color), supports_unicode());

    let output = match cli.command {
        Command::Genera { genus } => {
            let report = handle_genera(&catalog, genus.as_deref())?;
            match cli.format {
                OutputFormat::Text => renderer.render_genera(&report),
                OutputFormat::Json => to_json(&report)?,
            }
        }
        Command::Estimate(args) => {
            let request = EstimateRequest {
                body: args.body.as_deref(),
                genus: args.genus.as_deref(),
                region: args.region,
            };
            let report = handle_estimate(&catalog, &args.snapshot, request)?;
            match cli.format {
                OutputFormat::Text => renderer.render_estimate(&report),
                OutputFormat::Json => to_json(&report)?,
            }
        }
        Command::Validate => {
            let report = handle_validate(&catalog);
            match cli.format {
                OutputFormat::Text => renderer.render_validation(&report),
                OutputFormat::Json => to_json(&report)?,
            }
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let _ = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
}
