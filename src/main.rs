use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use statuswatch::data::export::export_to_file;
use statuswatch::data::MonitorData;
use statuswatch::{events, ui};
use statuswatch::{App, CliOverrides, DataSource, FileSource, HttpSource, Settings, Thresholds};
use statuswatch_adapters::uptime_kuma::UptimeKumaAdapter;
use statuswatch_types::HistoryBucketizer;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How often the TUI checks the HTTP poller's channel for a new snapshot.
const CHANNEL_CHECK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "statuswatch")]
#[command(about = "Terminal dashboard for public status pages")]
struct Args {
    /// Status page URL, either the page itself or the server's base URL
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Status page slug (when --url is a base URL)
    #[arg(long)]
    slug: Option<String>,

    /// Read a snapshot JSON file instead of polling over HTTP
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Poll interval (e.g., "60s", "5m") [default: 60s]
    #[arg(short, long)]
    refresh: Option<String>,

    /// HTTP request timeout [default: 10s]
    #[arg(long)]
    timeout: Option<String>,

    /// Number of cells in each history strip [default: 24]
    #[arg(short, long)]
    buckets: Option<u64>,

    /// Latency warning threshold (e.g., "500ms") [default: 500ms]
    #[arg(long)]
    latency_warn: Option<String>,

    /// Latency critical threshold [default: 2s]
    #[arg(long)]
    latency_crit: Option<String>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, export the dashboard state to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            url: self.url.clone(),
            slug: self.slug.clone(),
            file: self.file.clone(),
            refresh: self.refresh.clone(),
            timeout: self.timeout.clone(),
            buckets: self.buckets,
            latency_warn: self.latency_warn.clone(),
            latency_crit: self.latency_crit.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    let thresholds = settings.thresholds()?;
    let bucketizer = settings.bucketizer()?;
    let refresh = settings.refresh_interval()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_once(&settings, &bucketizer, export_path);
    }

    if let Some(ref path) = settings.file {
        info!(path = %path.display(), "watching snapshot file");
        return run_tui(Box::new(FileSource::new(path)), thresholds, bucketizer, refresh);
    }

    let adapter = build_adapter(&settings)?;
    let rt = tokio::runtime::Runtime::new()?;
    let source = {
        let _guard = rt.enter();
        HttpSource::spawn(adapter, refresh)
    };

    // The poller runs on the runtime's workers while the TUI owns this thread
    run_tui(Box::new(source), thresholds, bucketizer, CHANNEL_CHECK_INTERVAL)
}

/// Send tracing output to `path`, filtered by `RUST_LOG` (default `info`).
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn build_adapter(settings: &Settings) -> Result<UptimeKumaAdapter> {
    let url = settings
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("No status page given: pass --url, --file or set url in the config"))?;

    let mut builder =
        UptimeKumaAdapter::builder().endpoint(url).timeout(settings.request_timeout()?);
    if let Some(ref slug) = settings.slug {
        builder = builder.slug(slug.clone());
    }
    Ok(builder.build()?)
}

/// Collect a single snapshot (or read the snapshot file) and export it.
fn export_once(settings: &Settings, bucketizer: &HistoryBucketizer, export_path: &Path) -> Result<()> {
    let data = match settings.file {
        Some(ref path) => MonitorData::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let adapter = build_adapter(settings)?;
            let rt = tokio::runtime::Runtime::new()?;
            let snapshot = rt.block_on(adapter.collect())?;
            MonitorData::from_snapshot(snapshot)
        }
    };

    export_to_file(&data, bucketizer, export_path)?;
    println!("Exported {} monitors to: {}", data.monitors.len(), export_path.display());
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: Thresholds,
    bucketizer: HistoryBucketizer,
    refresh_interval: Duration,
) -> Result<()> {
    // Detect the theme before raw mode; the probe talks to the terminal
    let theme = ui::Theme::auto_detect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::with_theme(source, thresholds, bucketizer, theme);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(app.theme.pending));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Monitor table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::summary::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // The table's top border sits just below the header line
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 1),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
