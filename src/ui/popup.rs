use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::QueryError;

use super::projection::{PredictionOutcome, PredictionRecord};

/// A `width` x `height` box centred in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn popup_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn footer() -> Line<'static> {
    Line::from(Span::styled(
        "[Esc] close",
        Style::default().fg(Color::DarkGray),
    ))
}

pub struct PredictionPopup<'a> {
    outcome: &'a PredictionOutcome,
}

impl<'a> PredictionPopup<'a> {
    pub fn new(outcome: &'a PredictionOutcome) -> Self {
        Self { outcome }
    }
}

impl Widget for PredictionPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = centered_rect(40, 9, area);
        Clear.render(rect, buf);

        let (block, mut lines) = match self.outcome {
            PredictionOutcome::Show { symbol, record } => (
                popup_block(&format!("Prediction for {}", symbol), Color::Cyan),
                prediction_lines(record),
            ),
            PredictionOutcome::NoDataToPredict => (
                popup_block("No Data", Color::Yellow),
                vec![
                    Line::from("There is no data to predict yet."),
                    Line::from("Search for a stock first."),
                ],
            ),
        };
        lines.push(Line::from(""));
        lines.push(footer());

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(rect, buf);
    }
}

fn prediction_lines(record: &PredictionRecord) -> Vec<Line<'static>> {
    PredictionRecord::HEADERS
        .iter()
        .zip(record.cells())
        .map(|(header, value)| {
            Line::from(vec![
                Span::styled(
                    format!("Predicted {}: ", header),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

pub struct ErrorPopup<'a> {
    error: &'a QueryError,
    remaining: Option<Duration>,
}

impl<'a> ErrorPopup<'a> {
    pub fn new(error: &'a QueryError, remaining: Option<Duration>) -> Self {
        Self { error, remaining }
    }
}

impl Widget for ErrorPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = centered_rect(52, 9, area);
        Clear.render(rect, buf);

        let mut lines = vec![Line::from(self.error.message())];
        if let Some(remaining) = self.remaining {
            // Round up so the countdown never shows 0 while still locked.
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Retry in {}s", secs),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        lines.push(footer());

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(popup_block(self.error.title(), Color::Red))
            .render(rect, buf);
    }
}
