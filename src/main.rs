use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use tokio::sync::mpsc;

use intraday_forecast::alphavantage::rest::{MarketDataClient, Transport};
use intraday_forecast::catalog::SymbolCatalog;
use intraday_forecast::config::Config;
use intraday_forecast::event::AppEvent;
use intraday_forecast::input::{
    parse_input_command, parse_popup_command, InputCommand, PopupCommand,
};
use intraday_forecast::lifecycle::{QueryController, SubmitOutcome};
use intraday_forecast::ui::projection::request_prediction;
use intraday_forecast::ui::{self, AppState, QueryView};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env file exists with RAPIDAPI_KEY");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with TUI
    let log_file = std::fs::File::create("intraday-forecast.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        base_url = %config.provider.base_url,
        host = %config.provider.host,
        default_input = %config.query.default_input,
        "Starting intraday-forecast"
    );

    let catalog = match SymbolCatalog::load(Path::new(&config.catalog.path)) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Autocomplete disabled");
            SymbolCatalog::default()
        }
    };

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(64);
    let client = MarketDataClient::from_config(&config.provider)?;
    let mut controller = QueryController::new(client, app_tx);

    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(&config.query.default_input);
    app_state.push_log(format!(
        "intraday-forecast started | {} stocks in catalog",
        catalog.len()
    ));
    if catalog.is_empty() {
        app_state.push_log("[WARN] No stocks in catalog, autocomplete disabled".to_string());
    }
    submit_current_input(&mut app_state, &mut controller);

    loop {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &app_state,
                QueryView {
                    phase: controller.phase(),
                    cooldown_remaining: controller.cooldown_remaining(),
                },
            )
        })?;

        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if handle_key(&key, &mut app_state, &mut controller, &catalog, &config) {
                    tracing::info!("User quit");
                    break;
                }
            }
        }

        while let Ok(evt) = app_rx.try_recv() {
            app_state.apply(&evt);
            match evt {
                AppEvent::QueryResolved { query, outcome } => {
                    controller.resolve(&query, outcome);
                }
                AppEvent::CooldownElapsed { generation } => {
                    if controller.cooldown_elapsed(generation) {
                        app_state.push_log("Search unlocked".to_string());
                    }
                }
            }
        }
    }

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check intraday-forecast.log for details.");
    Ok(())
}

/// Returns true when the user asked to quit.
fn handle_key<T: Transport + 'static>(
    key: &KeyEvent,
    app_state: &mut AppState,
    controller: &mut QueryController<T>,
    catalog: &SymbolCatalog,
    config: &Config,
) -> bool {
    let error_open = controller.phase().error().is_some();
    if error_open || app_state.prediction_popup.is_some() {
        match parse_popup_command(key) {
            Some(PopupCommand::Quit) => return true,
            Some(PopupCommand::Close) if error_open => controller.dismiss(),
            Some(PopupCommand::Close) => app_state.close_prediction(),
            None => {}
        }
        return false;
    }

    let Some(cmd) = parse_input_command(key) else {
        return false;
    };
    match cmd {
        InputCommand::Quit => return true,
        InputCommand::Insert(c) => {
            app_state.insert_char(c);
            app_state.refresh_suggestions(catalog, config.catalog.max_suggestions);
        }
        InputCommand::Backspace => {
            app_state.backspace();
            app_state.refresh_suggestions(catalog, config.catalog.max_suggestions);
        }
        InputCommand::ClearInput => {
            app_state.clear_input();
            app_state.clear_suggestions();
        }
        InputCommand::SuggestionUp => app_state.select_prev_suggestion(),
        InputCommand::SuggestionDown => app_state.select_next_suggestion(),
        InputCommand::AcceptSuggestion => {
            app_state.accept_suggestion();
        }
        InputCommand::Submit => {
            app_state.clear_suggestions();
            submit_current_input(app_state, controller);
        }
        InputCommand::ShowPrediction => {
            app_state.open_prediction(request_prediction(controller.phase().report()));
        }
    }
    false
}

fn submit_current_input<T: Transport + 'static>(
    app_state: &mut AppState,
    controller: &mut QueryController<T>,
) {
    match controller.submit(&app_state.input) {
        SubmitOutcome::Started => {
            app_state.push_log(format!("Searching '{}'", app_state.input.trim()));
        }
        SubmitOutcome::Rejected(e) => {
            app_state.push_log(format!("[ERR] {}", e));
        }
        SubmitOutcome::CoolingDown { remaining } => {
            app_state.push_log(format!(
                "[WARN] Rate limited, try again in {}s",
                remaining.as_secs()
            ));
        }
    }
}
