//! sourcelog - Entry Point

use clap::Parser;
use sourcelog::config::{self, CliOverrides};
use sourcelog::demo::DemoProducer;
use sourcelog::layout_store::default_layout_path;
use sourcelog::logging::{self, SourceLogLayer};
use sourcelog::view::{self, SettingsLoader, ViewOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Documents opened when none are given on the command line.
const DEFAULT_DOCUMENTS: [&str; 3] = ["notebook.ipynb", "analysis.ipynb", "scratch.py"];

/// Interval between demo producer events.
const DEMO_INTERVAL: Duration = Duration::from_millis(800);

/// sourcelog - per-document logs in a terminal workbench
#[derive(Parser, Debug)]
#[command(name = "sourcelog")]
#[command(version)]
#[command(about = "Terminal workbench with a bounded log per open document")]
pub struct Args {
    /// Documents to open as tabs, each with its own log
    pub documents: Vec<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Entries kept per document log (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_log_entries: Option<u64>,

    /// Flash the status indicator on unseen log activity
    #[arg(long)]
    pub flash: bool,

    /// Log to the open documents from a background producer
    #[arg(long)]
    pub demo: bool,

    /// Do not restore or save the viewer layout
    #[arg(long)]
    pub no_restore: bool,
}

impl Args {
    /// Overrides for the configuration precedence chain.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            max_log_entries: self
                .max_log_entries
                .and_then(|n| usize::try_from(n).ok()),
            // Only override if flag was explicitly set
            flash: self.flash.then_some(true),
        }
    }

    /// Documents to open, falling back to the defaults.
    fn documents(&self) -> Vec<String> {
        if self.documents.is_empty() {
            DEFAULT_DOCUMENTS.iter().map(|d| d.to_string()).collect()
        } else {
            self.documents.clone()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let overrides = args.overrides();

    // Defaults → Config File → Env Vars → CLI Args
    let resolved = config::resolve(args.config.clone(), overrides);

    let log_path = match &resolved {
        Ok(config) => config.log_file_path.clone(),
        Err(_) => config::default_log_path(),
    };
    let (sender, receiver) = logging::sourced_channel();
    logging::init_with_sources(&log_path, Some(SourceLogLayer::new(sender)))?;

    match &resolved {
        Ok(config) => info!(config = ?config, "Configuration loaded and resolved"),
        Err(e) => warn!(error = %e, "Configuration failed to load, using defaults"),
    }

    let documents = args.documents();
    let _producer = args
        .demo
        .then(|| DemoProducer::spawn(documents.clone(), DEMO_INTERVAL));

    let config_path = args.config.clone();
    let reload: SettingsLoader =
        Box::new(move || config::resolve(config_path.clone(), overrides).map(|c| c.settings));

    view::run(ViewOptions {
        documents,
        settings: resolved.map(|c| c.settings),
        reload,
        sourced: Some(receiver),
        layout_path: (!args.no_restore).then(default_layout_path),
    })?;

    Ok(())
}
