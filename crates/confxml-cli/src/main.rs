//! `confxml` CLI: render JSON configuration into an XML server document.
//!
//! ## Usage
//!
//! ```sh
//! # Render JSON to a <Server version="8"> document (stdin → stdout)
//! echo '{"Name":"origin","Bind":{"Port":1935}}' | confxml render
//!
//! # Render from file to file
//! confxml render -i server.json -o Server.xml
//!
//! # Custom envelope, no version attribute, no indentation
//! confxml render --root Origin --no-version --compact -i server.json
//!
//! # Validate only (node shapes, element names, unsupported values)
//! confxml check -i server.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`);
//! `-v` raises the default to `debug`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confxml_core::{Envelope, Style, Value};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "confxml",
    version,
    about = "Render JSON configuration into an XML server document"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render JSON configuration to an XML document
    Render {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Root element name
        #[arg(long, default_value = "Server")]
        root: String,
        /// Value of the root element's `version` attribute
        #[arg(long = "doc-version", default_value = "8", conflicts_with = "no_version")]
        doc_version: String,
        /// Omit the `version` attribute on the root element
        #[arg(long)]
        no_version: bool,
        /// Emit no whitespace between tags
        #[arg(long, conflicts_with = "indent")]
        compact: bool,
        /// Spaces per nesting level when pretty printing
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
    /// Validate JSON configuration and render it without writing the document
    Check {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            root,
            doc_version,
            no_version,
            compact,
            indent,
        } => {
            let value = load_configuration(input.as_deref())?;

            let mut envelope = Envelope::new(root);
            if !no_version {
                envelope = envelope.with_version(doc_version);
            }
            let style = if compact {
                Style::Compact
            } else {
                Style::Pretty { indent }
            };

            let mut xml = confxml_core::render_document(&envelope, &value, style)
                .context("Failed to render configuration")?;
            if !xml.ends_with('\n') {
                xml.push('\n');
            }
            write_document(output.as_deref(), &xml)?;
            info!(root = %envelope.root, bytes = xml.len(), "rendered document");
        }
        Commands::Check { input } => {
            let value = load_configuration(input.as_deref())?;
            // Names and numbers are only checked while rendering.
            confxml_core::render_document(&Envelope::default(), &value, Style::Compact)
                .context("Failed to render configuration")?;
            println!("ok");
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .init();
}

/// Read and convert the JSON configuration from `input`, or stdin.
fn load_configuration(input: Option<&Path>) -> Result<Value> {
    let source = input.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    debug!(%source, "loading configuration");

    let text = match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    }
    .with_context(|| format!("Failed to read configuration from {source}"))?;

    confxml_core::parse_json(&text)
        .with_context(|| format!("Failed to load configuration from {source}"))
}

/// Write the rendered document to `output`, or stdout.
fn write_document(output: Option<&Path>, xml: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, xml)
            .with_context(|| format!("Failed to write document to {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(xml.as_bytes())
            .context("Failed to write document to stdout"),
    }
}
