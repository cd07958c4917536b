mod app;
mod color;
mod console;
mod data;
mod state;
mod stats;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use app::TitanicExplorerApp;
use clap::Parser;
use eframe::egui;

/// Descriptive statistics and charts for shipwreck passenger records.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Passenger table to load (.csv, .json or .parquet)
    path: Option<PathBuf>,

    /// Print the report as text instead of opening the viewer
    #[arg(long, requires = "path", conflicts_with = "json")]
    text: bool,

    /// Print the report as JSON instead of opening the viewer
    #[arg(long, requires = "path")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.path {
        Some(path) if args.text || args.json => print_report(&path, args.json),
        path => run_viewer(path.as_deref()),
    }
}

/// Headless mode: load, assemble, print to stdout.
fn print_report(path: &std::path::Path, json: bool) -> anyhow::Result<()> {
    let table = data::loader::load_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let report = stats::assemble(&table).context("assembling report")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", console::render(&report));
    }
    Ok(())
}

fn run_viewer(path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app = match path {
        Some(path) => TitanicExplorerApp::with_file(path),
        None => TitanicExplorerApp::default(),
    };

    eframe::run_native(
        "Titanic Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
