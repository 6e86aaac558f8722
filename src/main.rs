mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::layout::LayoutProfile;
use crate::pipeline::stage6_render::{RenderRequest, render_report};

#[derive(Debug, Parser)]
#[command(
    name = "pcalf-report",
    version,
    about = "Render a PCALF annotation database into a static HTML report"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the report from one database.
    Run(RunArgs),
}

#[derive(Debug, clap::Args)]
struct RunArgs {
    /// PCALF SQLite database.
    #[arg(long)]
    db: PathBuf,
    /// Directory holding template.html, template.css and template.js.
    #[arg(long, default_value = "templates")]
    templates: PathBuf,
    /// Output HTML file.
    #[arg(long)]
    out: PathBuf,
}

impl From<RunArgs> for RenderRequest {
    fn from(args: RunArgs) -> Self {
        RenderRequest {
            db: args.db,
            templates: args.templates,
            out: args.out,
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Command::Run(args) => {
            let request = RenderRequest::from(args);
            tracing::info!(
                db = %request.db.display(),
                templates = %request.templates.display(),
                "rendering report"
            );
            render_report(&request, &LayoutProfile::default_v1())
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
