//! reflex-context
//!
//! Parses an HTML document, picks a root element by selector and prints
//! its extracted dataset context as JSON.

use anyhow::{Context as _, Result};
use clap::Parser;
use reflex_dataset::{extract_context, extract_element, Schema};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "reflex-context")]
#[command(about = "Extract the dataset context of an element in an HTML document")]
struct Cli {
    /// HTML file to read, or `-` for stdin
    input: PathBuf,

    /// Selector of the root element (first match is used)
    #[arg(long, default_value = "[data-reflex]")]
    root: String,

    /// JSON file with a schema
    #[arg(long)]
    config: Option<PathBuf>,

    /// Attribute holding the base pass tokens
    #[arg(long)]
    dataset_attribute: Option<String>,

    /// Attribute holding the array pass tokens
    #[arg(long)]
    dataset_array_attribute: Option<String>,

    /// Let the array pass supply singular keys the base pass left unresolved
    #[arg(long)]
    fill_singulars: bool,

    /// Also print the root's full attributes
    #[arg(long)]
    attributes: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let html = read_input(&cli.input)?;
    let doc = reflex_html::parse(&html).context("failed to parse HTML")?;
    let schema = build_schema(&cli)?;

    let root = doc
        .query_selector(&cli.root)
        .with_context(|| format!("invalid root selector `{}`", cli.root))?
        .with_context(|| format!("no element matches `{}`", cli.root))?;
    tracing::debug!("Extracting context of {} with {:?}", root, schema);

    let output = if cli.attributes {
        serde_json::to_value(extract_element(&doc, root, &schema)?)?
    } else {
        serde_json::to_value(extract_context(&doc, root, &schema))?
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("failed to read HTML from stdin")?;
        return Ok(html);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn build_schema(cli: &Cli) -> Result<Schema> {
    let mut schema = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<Schema>(&raw)
                .with_context(|| format!("invalid schema in {}", path.display()))?
        }
        None => Schema::default(),
    };

    if let Some(name) = &cli.dataset_attribute {
        schema = schema.with_dataset_attribute(Some(name.as_str()));
    }
    if let Some(name) = &cli.dataset_array_attribute {
        schema = schema.with_dataset_array_attribute(Some(name.as_str()));
    }
    if cli.fill_singulars {
        schema = schema.with_fill_singulars(true);
    }
    Ok(schema)
}
