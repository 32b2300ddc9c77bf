use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use kiosk_core::config_file::{self, ConfigFile, DisplayConfig, GalleryConfig, StoreConfig};
use kiosk_core::prefs::{FilePreferences, MemoryPreferences, PreferenceStore, load_device_class};
use kiosk_core::{
    CaptureStore, CloudinaryResolver, DEFAULT_SOURCES, DeviceClass, GalleryState, SupabaseStore,
    VisibilitySet,
};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Kiosk TUI: browse a day of news-site homepage screenshots in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Supabase project URL (overrides SUPABASE_URL and the config file)
    #[arg(long)]
    url: Option<String>,

    /// Supabase publishable key (overrides SUPABASE_PUBLISHABLE_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Day to open, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Device class to show: desktop or mobile (default: last used)
    #[arg(long)]
    device: Option<DeviceClass>,

    /// Comma-separated sources visible at startup
    #[arg(long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Frames per second for the UI tick
    #[arg(long)]
    fps: Option<u32>,

    /// Log file (default: <cache dir>/kiosk/kiosk-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let file_config = config_file::load_config();

    let log_path = args.log_file.clone().or_else(logging::default_log_path);
    let _log_guard = match &log_path {
        Some(path) => Some(logging::init(path)?),
        None => None,
    };

    // Resolve config from CLI flags > env vars > config file > defaults
    let store_cfg = file_config.store.clone().unwrap_or_default();
    let gallery_cfg = file_config.gallery.clone().unwrap_or_default();
    let display_cfg = file_config.display.clone().unwrap_or_default();

    let url = args
        .url
        .clone()
        .or_else(|| std::env::var("SUPABASE_URL").ok())
        .or(store_cfg.url);
    let publishable_key = args
        .key
        .clone()
        .or_else(|| std::env::var("SUPABASE_PUBLISHABLE_KEY").ok())
        .or(store_cfg.publishable_key);
    let timeout_secs = args.timeout.or(store_cfg.timeout_secs).unwrap_or(10);
    let sources: Vec<String> = if !args.sources.is_empty() {
        args.sources.clone()
    } else {
        gallery_cfg
            .default_sources
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect())
    };
    let defaults = CloudinaryResolver::default();
    let resolver = CloudinaryResolver {
        preview_width: gallery_cfg.preview_width.unwrap_or(defaults.preview_width),
        full_width: gallery_cfg.full_width.unwrap_or(defaults.full_width),
    };
    let theme_name = args
        .theme
        .clone()
        .or(display_cfg.theme)
        .unwrap_or_else(|| "hacker".to_string());
    let fps = args.fps.or(display_cfg.fps).unwrap_or(10).clamp(1, 60);

    if args.write_config {
        let effective = ConfigFile {
            store: Some(StoreConfig {
                url: url.clone(),
                publishable_key: publishable_key.clone(),
                timeout_secs: Some(timeout_secs),
            }),
            gallery: Some(GalleryConfig {
                default_sources: Some(sources),
                preview_width: Some(resolver.preview_width),
                full_width: Some(resolver.full_width),
            }),
            display: Some(DisplayConfig {
                theme: Some(theme_name),
                fps: Some(fps),
            }),
        };
        let path = config_file::save_config(&effective)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let Some(url) = url else {
        anyhow::bail!(
            "no store URL: pass --url, set SUPABASE_URL, or add [store] url to {}",
            config_file::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string())
        );
    };
    let Some(publishable_key) = publishable_key else {
        anyhow::bail!("no publishable key: pass --key or set SUPABASE_PUBLISHABLE_KEY");
    };
    let store: Arc<dyn CaptureStore> = Arc::new(SupabaseStore::new(
        &url,
        &publishable_key,
        Duration::from_secs(timeout_secs),
    ));

    let prefs: Box<dyn PreferenceStore> = match FilePreferences::default_path() {
        Some(path) => Box::new(FilePreferences::open(&path)),
        None => Box::new(MemoryPreferences::default()),
    };
    let device = args
        .device
        .or_else(|| load_device_class(prefs.as_ref()))
        .unwrap_or_default();
    let day = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::info!(%day, %device, %url, "starting kiosk-tui");

    let gallery = GalleryState::new(day, device, VisibilitySet::new(sources));
    let mut app = App::new(gallery, theme::Theme::by_name(&theme_name), prefs, resolver);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    tokio::spawn(backend::run_listener(
        store,
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    app.backend_cmd_tx = Some(cmd_tx);
    app.dispatch_fetch();
    app.request_active_days();

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let tick_rate = Duration::from_millis(1000 / u64::from(fps));

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    tracing::info!("kiosk-tui exited");

    Ok(())
}
