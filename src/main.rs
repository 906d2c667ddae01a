mod input;
mod logging;
mod pipeline;
mod render;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::pipeline::stage2_sweep::{SweepConfig, SweepError, run_sweep};
use crate::render::{
    DEFAULT_ESCHER_URL, DEFAULT_SCALE_PRESET, EscherHtmlRenderer, RenderOptions, ScrollBehavior,
};
use crate::report::SummaryData;
use crate::report::json::write_summary;

#[derive(Debug, Parser)]
#[command(
    name = "cellfie-escher",
    version,
    about = "Overlay CellFie scores onto Escher pathway maps as static HTML"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render every score column onto every map in the map directory.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// CellFie CSV (optionally gzipped); column 0 holds reaction ids.
    #[arg(long)]
    input: PathBuf,
    /// Output root; one subdirectory is created per score column.
    #[arg(long = "out")]
    out_dir: PathBuf,
    /// Directory of Escher map files.
    #[arg(long)]
    maps: PathBuf,
    #[arg(long, default_value = DEFAULT_SCALE_PRESET)]
    scale_preset: String,
    #[arg(long, value_enum, default_value_t = ScrollBehavior::Zoom)]
    scroll_behavior: ScrollBehavior,
    /// Let the page prompt before the browser tab is closed.
    #[arg(long)]
    ask_before_quit: bool,
    #[arg(long, default_value = DEFAULT_ESCHER_URL)]
    escher_url: String,
    /// Also write summary.json to the output root.
    #[arg(long)]
    summary: bool,
}

impl RunArgs {
    fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            input: self.input.clone(),
            output_root: self.out_dir.clone(),
            map_dir: self.maps.clone(),
            options: RenderOptions {
                reaction_scale_preset: self.scale_preset.clone(),
                scroll_behavior: self.scroll_behavior,
                never_ask_before_quit: !self.ask_before_quit,
                escher_url: self.escher_url.clone(),
            },
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SweepError> {
    match cli.command {
        Command::Run(args) => {
            let config = args.sweep_config();
            tracing::info!(
                "input={}, maps={}, out={}",
                config.input.display(),
                config.map_dir.display(),
                config.output_root.display()
            );

            let report = run_sweep(&config, &EscherHtmlRenderer)?;
            tracing::info!(
                "wrote {} pages for {} columns",
                report.artifact_count(),
                report.columns.len()
            );

            if args.summary {
                let summary = SummaryData::new(&report, &config.options);
                let path = write_summary(&summary, &config.output_root)?;
                tracing::info!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}
