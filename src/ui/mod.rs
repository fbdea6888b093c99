pub mod chart;
pub mod dashboard;
pub mod popup;
pub mod projection;

use std::time::Duration;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::catalog::SymbolCatalog;
use crate::event::AppEvent;
use crate::lifecycle::QueryPhase;

use chart::PriceChart;
use dashboard::{KeybindBar, LogPanel, SearchBar, StatusBar, SuggestionList, SummaryPanel};
use popup::{ErrorPopup, PredictionPopup};
use projection::PredictionOutcome;

const MAX_LOG_MESSAGES: usize = 200;

/// Everything the screen owns that is not query state.
pub struct AppState {
    pub input: String,
    pub suggestions: Vec<String>,
    pub selected_suggestion: Option<usize>,
    pub prediction_popup: Option<PredictionOutcome>,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(default_input: &str) -> Self {
        Self {
            input: default_input.to_string(),
            suggestions: Vec::new(),
            selected_suggestion: None,
            prediction_popup: None,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn refresh_suggestions(&mut self, catalog: &SymbolCatalog, limit: usize) {
        self.suggestions = catalog.suggest(&self.input, limit);
        self.selected_suggestion = if self.suggestions.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected_suggestion = None;
    }

    pub fn select_next_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let next = self
            .selected_suggestion
            .map_or(0, |i| (i + 1) % self.suggestions.len());
        self.selected_suggestion = Some(next);
    }

    pub fn select_prev_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len();
        let prev = self.selected_suggestion.map_or(len - 1, |i| (i + len - 1) % len);
        self.selected_suggestion = Some(prev);
    }

    /// Copy the highlighted suggestion into the input. Returns false when
    /// nothing is highlighted.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(label) = self
            .selected_suggestion
            .and_then(|i| self.suggestions.get(i))
            .cloned()
        else {
            return false;
        };
        self.input = label;
        self.clear_suggestions();
        true
    }

    pub fn open_prediction(&mut self, outcome: PredictionOutcome) {
        self.prediction_popup = Some(outcome);
    }

    pub fn close_prediction(&mut self) {
        self.prediction_popup = None;
    }

    /// Log-facing side of an event. Query state itself lives in the controller.
    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::QueryResolved { query, outcome } => match outcome {
                Ok(report) => self.push_log(format!(
                    "{} loaded ({} points)",
                    report.symbol,
                    report.series.len()
                )),
                Err(e) => {
                    let prefix = if e.cooldown().is_some() { "[WARN]" } else { "[ERR]" };
                    self.push_log(format!("{} '{}': {}", prefix, query.raw_input().trim(), e));
                }
            },
            AppEvent::CooldownElapsed { .. } => {}
        }
    }
}

/// Query state as seen by one frame.
pub struct QueryView<'a> {
    pub phase: &'a QueryPhase,
    pub cooldown_remaining: Option<Duration>,
}

pub fn render(frame: &mut Frame, state: &AppState, view: QueryView<'_>) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Length(3),  // search
            Constraint::Min(8),     // chart + summary
            Constraint::Length(6),  // log
            Constraint::Length(1),  // keybinds
        ])
        .split(frame.area());

    let report = view.phase.report();

    frame.render_widget(
        StatusBar {
            symbol: report.map(|r| r.symbol.as_str()),
            phase: view.phase.label(),
            cooldown_secs: view.cooldown_remaining.map(|d| d.as_secs()),
        },
        outer[0],
    );

    frame.render_widget(
        SearchBar {
            input: &state.input,
            locked: view.phase.is_cooling_down(),
        },
        outer[1],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(24)])
        .split(outer[2]);

    let chart = PriceChart::new(report.map(|r| &r.chart));
    let chart = match view.phase {
        QueryPhase::Fetching { .. } => chart.placeholder("Loading..."),
        _ => chart,
    };
    frame.render_widget(chart, main_area[0]);
    frame.render_widget(SummaryPanel::new(report.map(|r| &r.summary)), main_area[1]);

    frame.render_widget(LogPanel::new(&state.log_messages), outer[3]);
    frame.render_widget(KeybindBar, outer[4]);

    if !state.suggestions.is_empty() {
        let area = suggestion_area(outer[1], outer[2], state.suggestions.len());
        frame.render_widget(Clear, area);
        frame.render_widget(
            SuggestionList::new(&state.suggestions, state.selected_suggestion),
            area,
        );
    }

    if let Some(outcome) = &state.prediction_popup {
        frame.render_widget(PredictionPopup::new(outcome), frame.area());
    }
    if let Some(error) = view.phase.error() {
        frame.render_widget(ErrorPopup::new(error, view.cooldown_remaining), frame.area());
    }
}

/// Drop-down directly under the search bar, never taller than the main area.
fn suggestion_area(search: Rect, main: Rect, items: usize) -> Rect {
    let height = (items as u16 + 2).min(main.height);
    Rect {
        x: search.x,
        y: search.y + search.height,
        width: search.width.min(48),
        height,
    }
}
