//! weatherview - current weather and a live clock in the terminal
//!
//! Search a city by name, or let the app locate you at startup. Temperatures
//! toggle between Celsius and Fahrenheit and the screen is tinted by the
//! kind of weather.

use std::io;
use std::panic;
use std::process;

use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use weatherview::app::App;
use weatherview::cli::{Cli, StartupConfig};
use weatherview::clock::ClockTask;
use weatherview::config::{Config, API_KEY_ENV};
use weatherview::data::{GeolocationClient, WeatherClient};
use weatherview::events::{self, AppEvent};
use weatherview::fetch::FetchSlot;
use weatherview::{input, logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Resolves configuration from file, environment and command line
fn load_config(startup: &StartupConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load(startup.config_path.as_deref())?;
    config.apply_env_api_key(std::env::var(API_KEY_ENV).ok());
    config.apply_startup(startup);
    config.validate()?;
    Ok(config)
}

fn exit_with_error(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = StartupConfig::from_cli(&cli).unwrap_or_else(|e| exit_with_error(e));

    let log_path = match startup.log_file.clone() {
        Some(path) => Some(path),
        None => Config::default_log_path().ok(),
    };
    if let Some(path) = log_path {
        if let Err(e) = logging::init(&path) {
            eprintln!("Warning: logging disabled ({}): {}", path.display(), e);
        }
    }

    // Configuration problems are reported before the terminal is taken over
    let config = load_config(&startup).unwrap_or_else(|e| exit_with_error(e));
    tracing::debug!(?config, "configuration loaded");

    let api_key = config.api_key()?.to_string();
    let weather_client = WeatherClient::with_timeout(api_key, config.request_timeout())?
        .with_base_url(config.base_url.clone());

    let (tx, mut rx) = events::channel();
    let mut fetch_slot = FetchSlot::new(weather_client, tx.clone());
    let clock = ClockTask::spawn(config.clock_interval(), tx.clone());

    let mut app = App::with_unit(config.unit);

    let locator = match app.start(input::startup_plan(&startup, &config)) {
        Some(source) => {
            let http_client = reqwest::Client::builder()
                .timeout(config.request_timeout())
                .build()?;
            let geolocation = GeolocationClient::new(source).with_client(http_client);
            tracing::info!(source = ?geolocation.source(), "looking up startup location");
            let tx = tx.clone();
            Some(tokio::spawn(async move {
                let located = geolocation.locate().await;
                let _ = tx.send(AppEvent::Located(located)).await;
            }))
        }
        None => None,
    };
    drop(tx);

    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut key_events = EventStream::new();

    let result: Result<(), Box<dyn std::error::Error>> = async {
        loop {
            if let Some(query) = app.take_pending_query() {
                fetch_slot.trigger(query);
            }

            terminal.draw(|f| ui::render(f, &app))?;

            tokio::select! {
                maybe_event = key_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => app.should_quit = true,
                },
                Some(event) = rx.recv() => match event {
                    AppEvent::Tick(now) => app.tick(now),
                    AppEvent::Located(located) => app.apply_geolocation(located),
                    AppEvent::Fetched(completion) => {
                        if fetch_slot.accept(&completion) {
                            app.apply_fetch(completion);
                        }
                    }
                },
            }

            if app.should_quit {
                break;
            }
        }
        Ok(())
    }
    .await;

    // Stop background work before handing the terminal back
    if let Some(handle) = locator {
        handle.abort();
    }
    fetch_slot.cancel();
    drop(clock);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("exiting");
    result
}
