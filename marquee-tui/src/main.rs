mod api;
mod app;
mod config;
mod hold;
#[macro_use]
mod logging;
mod route;
mod seats;
mod server_config;
mod session;
mod terminal;
mod ui;

use std::time::{Duration, Instant};

use anyhow::Result;
use app::{App, Modal};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use route::Route;

/// Marquee - a keyboard-driven cinema box office for your terminal
#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Browse movies, pick seats and book tickets from the terminal")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "MARQUEE_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// View to open at startup, as a navigation fragment (e.g. "#showtimes")
    #[arg(long)]
    open: Option<String>,
}

// Load environment variables from a .env file so MARQUEE_SERVER_URL and
// friends can be set without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_env();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    // Server URL priority: CLI arg > env var > saved config > default
    let server_config_manager = server_config::ServerConfigManager::new()?;
    let server_url = server_config_manager.determine_server_url(cli.server.clone())?;
    log::info!("Using server {}", server_url);

    // An explicitly passed URL becomes the saved default for later runs
    if cli.server.is_some() {
        if let Err(e) = server_config_manager.save_server_url(server_url.clone()) {
            log::warn!("Failed to save server URL: {}", e);
        }
    }

    let mut app = App::new(server_url);
    app.log_config = log_config;

    // Restore a persisted session before drawing anything
    match app.restore_session().await {
        Ok(Some(user)) => {
            log::info!("Restored session for {}", user.email);
            app.auth.current_user = Some(user);
        }
        Ok(None) => {
            log::info!("No valid session found, browsing anonymously");
        }
        Err(e) => {
            log::warn!("Session restore failed: {}", e);
        }
    }

    if let Some(fragment) = &cli.open {
        app.navigate(Route::parse(fragment));
    }

    let mut tui = terminal::init()?;

    // Main event loop
    while app.running {
        // Hold-timer expiry and alert housekeeping
        app.tick(Instant::now());

        tui.draw(|frame| ui::render(&mut app, frame))?;

        // Perform a pending route load after the loading state has rendered
        if app.needs_load {
            app.needs_load = false;
            app.load_current_route().await?;
        }

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            // Keyboard-only navigation
            if matches!(event, Event::Mouse(_)) {
                continue;
            }

            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Async operations are dispatched here; everything else
                // falls through to the synchronous handler
                match key.code {
                    KeyCode::Enter if app.modal == Modal::Login => {
                        app.submit_login().await?;
                    }
                    KeyCode::Enter if app.modal == Modal::Register => {
                        app.submit_register().await?;
                    }
                    KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y')
                        if app.modal == Modal::CancelReservation =>
                    {
                        app.confirm_cancel_reservation().await?;
                    }
                    KeyCode::Enter | KeyCode::Char('c')
                        if app.modal == Modal::None
                            && matches!(app.current_route, Route::Showtime(_))
                            && app.booking.is_some() =>
                    {
                        app.confirm_selection().await?;
                    }
                    KeyCode::Enter
                        if app.modal == Modal::None
                            && app.current_route == Route::Profile
                            && app.profile.editing =>
                    {
                        app.submit_profile().await?;
                    }
                    KeyCode::Enter
                        if app.modal == Modal::None
                            && matches!(app.current_route, Route::Payment(_)) =>
                    {
                        app.submit_payment().await?;
                    }
                    // Logout (Shift+L), ignored while a form is capturing text
                    KeyCode::Char('L')
                        if app.modal == Modal::None
                            && app.auth.is_authenticated()
                            && !app.profile.editing
                            && !matches!(app.current_route, Route::Payment(_)) =>
                    {
                        app.logout().await?;
                    }
                    _ => {
                        app.handle_key_event(key)?;
                    }
                }
            }
        }
    }

    terminal::restore()?;

    Ok(())
}
