use anyhow::{bail, Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use spotuify::app::cli::{Args, CliCommand};
use spotuify::app::config::{AppConfig, UserConfig};
use spotuify::app::events::AppEvent;
use spotuify::app::inputs::{self, Context};
use spotuify::app::App;
use spotuify::player::spotify::auth::{self, OAuthSettings, OAuthTokens};
use spotuify::player::spotify::SpotifyClient;
use spotuify::player::{LibraryService, PlaybackService};
use spotuify::sync::{Dispatcher, DispatcherConfig, Poller, PollerConfig};
use spotuify::ui;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Redraw rate for the progress bar and toast animation
const TICK: Duration = Duration::from_millis(100);

fn init_logging() -> WorkerGuard {
    let file_appender =
        tracing_appender::rolling::daily(AppConfig::get_cache_dir(), "spotuify.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    guard
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn oauth_settings(config: &UserConfig) -> OAuthSettings {
    OAuthSettings {
        client_id: config.client_id.clone(),
        client_secret: config.client_secret.clone(),
        redirect_uri: config.redirect_uri.clone(),
        cache_path: AppConfig::get_token_path(),
        timeout: config.request_timeout(),
    }
}

fn require_credentials(config: &UserConfig) -> Result<()> {
    if !config.is_configured() {
        bail!(
            "Spotify credentials missing.\n\
             Create an app at https://developer.spotify.com/dashboard, add {} as a redirect URI,\n\
             then set client_id and client_secret in {}",
            config.redirect_uri,
            AppConfig::get_config_path().display()
        );
    }
    Ok(())
}

/// Authorization-code flow without a callback server: the user pastes the redirected URL.
async fn run_auth(config: &UserConfig) -> Result<()> {
    require_credentials(config)?;
    let tokens = OAuthTokens::new(oauth_settings(config))?;
    let url = tokens.authorize_url()?;

    println!("Open this URL in your browser and approve access:\n\n  {}\n", url);
    print!("Then paste the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let code = auth::code_from_redirect(&line)?;
    tokens.exchange_code(&code).await?;
    println!("✓ Authorized. Run `spotuify` to start.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::generate_config()?);
        return Ok(());
    }

    let _log_guard = init_logging();
    let (mut config, state) = AppConfig::load();
    if let Some(ms) = args.interval {
        config.poll_interval_ms = ms;
    }

    match args.command {
        Some(CliCommand::Auth) => return run_auth(&config).await,
        Some(CliCommand::Logout) => {
            auth::logout(&AppConfig::get_token_path())?;
            println!("Logged out.");
            return Ok(());
        }
        None => {}
    }

    require_credentials(&config)?;
    let tokens = Arc::new(OAuthTokens::new(oauth_settings(&config))?);
    if !tokens.has_token().await {
        bail!("Not authorized yet. Run `spotuify auth` first.");
    }

    let client = Arc::new(
        SpotifyClient::new(tokens.clone(), config.request_timeout())
            .context("building Spotify http client")?,
    );
    let playback: Arc<dyn PlaybackService> = client.clone();
    let library: Arc<dyn LibraryService> = client;

    // Sync core: the poller owns the canonical snapshot, the dispatcher overlays pending commands
    let (sync_tx, mut sync_rx) = mpsc::channel(100);
    let poller = Poller::new(
        playback.clone(),
        PollerConfig {
            interval: config.poll_interval(),
            timeout: config.request_timeout(),
        },
        sync_tx.clone(),
    );
    let dispatcher_config = DispatcherConfig {
        timeout: config.request_timeout(),
        default_volume: config.default_volume,
    };
    let dispatcher = Dispatcher::new(playback, poller.subscribe(), sync_tx, dispatcher_config);
    let poller = poller.spawn();
    info!(interval_ms = config.poll_interval_ms, "sync started");

    // Panics must leave the terminal usable
    let panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        panic_hook(info);
    }));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(&config, state, ui::theme::load_current_theme());
    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Sync events onto the app channel
    let tx_sync = tx.clone();
    tokio::spawn(async move {
        while let Some(event) = sync_rx.recv().await {
            if tx_sync.send(AppEvent::Sync(event)).await.is_err() {
                break;
            }
        }
    });

    // 3. Tick Task
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let result: Result<()> = async {
        loop {
            app.sync_from(&dispatcher);
            terminal.draw(|f| ui::ui(f, &mut app))?;

            let Some(event) = rx.recv().await else {
                break;
            };
            match event {
                AppEvent::Input(Event::Key(key)) => {
                    let ctx = Context {
                        dispatcher: &dispatcher,
                        library: &library,
                        tx: &tx,
                    };
                    inputs::handle_event(key, &mut app, &ctx);
                }
                AppEvent::Input(_) => {}
                AppEvent::Sync(event) => app.on_sync_event(&event),
                AppEvent::LibraryLoaded(ticket, title, items) => {
                    app.library.apply_loaded(ticket, title, items);
                }
                AppEvent::DevicesLoaded(devices) => app.on_devices_loaded(devices),
                AppEvent::Notice(message) => app.show_toast(&message),
                AppEvent::LibraryFailed(kind) => app.on_library_failed(kind),
                AppEvent::Tick => app.on_tick(),
            }

            if app.reauth_requested {
                app.reauth_requested = false;
                if tokens.reload().await {
                    info!("token reloaded, resuming sync");
                    poller.resume();
                } else {
                    app.show_toast("✗ No token found, run `spotuify auth` first");
                }
            }

            if !app.is_running {
                break;
            }
        }
        Ok(())
    }
    .await;

    restore_terminal();
    terminal.show_cursor()?;

    poller.stop().await;
    app.save_state();
    if let Err(e) = &result {
        error!("exiting after error: {:#}", e);
    }
    result
}
