mod app;
mod command;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod session;
mod theme;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::app::App;
use crate::config::{AppConfig, LogConfig, ThemeConfig, WatcherConfig};
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::fs::watcher::FsWatcher;
use crate::session::Session;
use crate::tui::{install_panic_hook, Tui};

/// Browse a directory and annotate its entries by position (NER).
#[derive(Parser, Debug)]
#[command(name = "nerx", version, about)]
struct Cli {
    /// Directory to start in (defaults to the configured path, then the current directory)
    path: Option<PathBuf>,

    /// Path to a config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not refresh the listing when the directory changes on disk
    #[arg(long)]
    no_watcher: bool,

    /// Log filter, e.g. `debug` or `ner_explorer=trace`
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Color scheme: dark or light
    #[arg(long)]
    theme: Option<String>,
}

impl Cli {
    /// Flags expressed as a partial config, so they merge on top of files.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            watcher: WatcherConfig {
                enabled: self.no_watcher.then_some(false),
                ..Default::default()
            },
            log: LogConfig {
                level: self.log_level.clone(),
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let start = start_path(&cli, &config);
    if !start.is_dir() {
        eprintln!("{}", AppError::InvalidPath(start.display().to_string()));
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    }

    init_logging(&config);

    match run(&start, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting after error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn start_path(cli: &Cli, config: &AppConfig) -> PathBuf {
    if let Some(path) = &cli.path {
        return path.clone();
    }
    if let Some(path) = config.default_path() {
        return PathBuf::from(path);
    }
    PathBuf::from(".")
}

fn init_logging(config: &AppConfig) {
    if !config.log_enabled() {
        return;
    }
    let Some(dir) = config.log_dir() else {
        eprintln!("Warning: no log directory available, logging disabled");
        return;
    };
    if let Err(e) = logging::init(&dir, config.log_level()) {
        eprintln!("Warning: {}", e);
    }
}

async fn run(start: &Path, config: &AppConfig) -> error::Result<()> {
    let session = Session::open(start, config.session_options())?;
    let mut app = App::new(session, theme::resolve_theme(config.theme_scheme()));

    install_panic_hook();
    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();
    let debounce = Duration::from_millis(config.debounce_ms());

    let mut watcher = if config.watcher_enabled() {
        watch(app.session.path(), debounce, &event_tx)
    } else {
        None
    };
    app.watcher_active = watcher.is_some();

    let result = loop {
        if let Err(e) = tui.draw(|frame| ui::render(&mut app, frame)) {
            break Err(e);
        }

        match events.next().await {
            Ok(Event::Key(key)) => handler::handle_key_event(&mut app, key),
            Ok(Event::Tick) => app.clear_expired_status(),
            Ok(Event::Resize) => {}
            Ok(Event::FsChange(paths)) => app.handle_fs_change(paths),
            Err(e) => break Err(e),
        }

        // Follow the session into the directory it navigated to.
        if app.watcher_active
            && watcher
                .as_ref()
                .is_some_and(|w| w.dir() != app.session.path())
        {
            watcher = watch(app.session.path(), debounce, &event_tx);
            app.watcher_active = watcher.is_some();
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui.restore()?;
    tracing::info!("bye");
    result
}

fn watch(
    dir: &Path,
    debounce: Duration,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
) -> Option<FsWatcher> {
    match FsWatcher::new(dir, debounce, event_tx.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "watcher unavailable");
            None
        }
    }
}
