//! dora-forms - review, edit and export saved DORA questionnaires.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use dora_doc_pdf::PdfGenerator;
use dora_forms::{ExportOptions, FormSource, Language, SavedForms, SavedFormsProps};
use dora_forms_app::{AppConfig, Catalog, JsonFormStore};
use dora_forms_chart::BarChartCanvas;
use dora_forms_ratatui::SavedFormsTui;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "dora-forms.toml";

/// Saved DORA questionnaires
#[derive(Parser, Debug)]
#[command(name = "dora-forms")]
#[command(about = "Review, edit and export saved DORA questionnaires")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file holding the saved forms
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Interface and report language (es, pt)
    #[arg(short, long)]
    lang: Option<Language>,

    /// Directory the PDF report is written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::load(DEFAULT_CONFIG_FILE)?
            }
            None => AppConfig::default(),
        };

        if let Some(data) = &self.data {
            config.data_file = data.clone();
        }
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

/// Log to a file; the terminal belongs to the TUI.
fn setup_logging(config: &AppConfig) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    setup_logging(&config)?;

    let catalog = match &config.catalog_file {
        Some(path) => Catalog::load(path)?,
        None => Catalog::dora(),
    };
    let store = JsonFormStore::open(&config.data_file)?;
    info!(
        data = %store.path().display(),
        forms = store.forms().len(),
        language = %config.language,
        "starting dora-forms"
    );

    let props = SavedFormsProps::new(
        store.forms(),
        catalog.questions,
        catalog.categories,
        config.language,
    );
    let chart = BarChartCanvas::new(config.chart.width, config.chart.height);
    let export = ExportOptions::new().with_directory(&config.export_dir);
    let mut view =
        SavedForms::new(props, store, chart, PdfGenerator::new()).with_export_options(export);

    SavedFormsTui::new().run(&mut view)?;
    Ok(())
}
