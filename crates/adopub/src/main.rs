//! adopub CLI - AsciiDoc to Confluence publisher.
//!
//! Converts a single AsciiDoc document to XHTML via `asciidoctor`,
//! uploads embedded images as attachments and creates or updates the
//! matching Confluence page.

mod error;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use adopub_confluence::{
    ConfluenceClient, PagePublisher, PublishAction, PublishConfig, PublishResult,
};
use error::CliError;
use output::Output;

/// Fixed path of the shared stylesheet embedded into every page.
const STYLESHEET_PATH: &str = "/documents/default.css";

/// adopub - AsciiDoc to Confluence publisher.
#[derive(Parser)]
#[command(name = "adopub", version, about)]
struct Cli {
    /// Path to the input AsciiDoc file.
    input_file: PathBuf,

    /// Confluence space key.
    #[arg(long)]
    space: String,

    /// ID of the parent page; new pages are created under it and image
    /// attachments are uploaded to it.
    #[arg(long)]
    parent_page_id: String,

    /// Confluence API token.
    #[arg(long)]
    token: String,

    /// Base URL of the Confluence service.
    #[arg(long, env = "CONFLUENCE_URL", hide_env_values = true)]
    confluence_url: String,

    /// Skip the update when the remote page content is already identical.
    #[arg(long)]
    skip_unchanged: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    output.separator();
    output.highlight("Converting AsciiDoc to XHTML");
    output.separator();

    let rendered_path = adopub_render::asciidoctor::convert(&cli.input_file)?;
    output.info(&format!(
        "Converted {} => {}",
        cli.input_file.display(),
        rendered_path.display()
    ));

    output.info(&format!("-> Reading {}", rendered_path.display()));
    let xhtml = std::fs::read_to_string(&rendered_path)?;

    output.info(&format!("-> Loading {STYLESHEET_PATH}"));
    let stylesheet = std::fs::read_to_string(STYLESHEET_PATH)?;

    let client = ConfluenceClient::from_config(&cli.confluence_url, &cli.token)?;
    let publisher = PagePublisher::new(
        &client,
        PublishConfig {
            space_key: cli.space.clone(),
            parent_page_id: cli.parent_page_id.clone(),
            skip_unchanged: cli.skip_unchanged,
        },
    );

    let document_dir = rendered_path.parent().unwrap_or(Path::new("."));

    output.info("-> Publishing to Confluence");
    let result = publisher.publish(&xhtml, document_dir, &stylesheet)?;
    print_result(output, &result);

    Ok(())
}

fn print_result(output: &Output, result: &PublishResult) {
    match result.action {
        PublishAction::Created => {
            output.success(&format!("Confluence page created (ID: {})", result.page.id));
        }
        PublishAction::Updated => {
            output.success(&format!("Confluence page updated (ID: {})", result.page.id));
        }
        PublishAction::Unchanged => {
            output.info(&format!(
                "Confluence page content is already up to date (ID: {})",
                result.page.id
            ));
        }
    }

    output.info(&format!("Title: {}", result.page.title));

    if result.images_uploaded > 0 {
        output.info(&format!("Images uploaded: {}", result.images_uploaded));
    }

    if !result.images_skipped.is_empty() {
        output.warning(&format!(
            "Warning: {} image(s) could not be relinked:",
            result.images_skipped.len()
        ));
        for src in &result.images_skipped {
            output.info(&format!("  - {src}"));
        }
    }
}
