use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::projection::{format_price, ChartSeries};

const PROVIDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `"2024-01-02 15:55:00"` → `"01-02 15:55"`; anything else is shown as-is.
pub fn short_time_label(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, PROVIDER_TIMESTAMP_FORMAT) {
        Ok(ts) => ts.format("%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub struct PriceChart<'a> {
    series: Option<&'a ChartSeries>,
    placeholder: &'a str,
}

impl<'a> PriceChart<'a> {
    pub fn new(series: Option<&'a ChartSeries>) -> Self {
        Self {
            series,
            placeholder: "No data. Search for a stock to load its chart.",
        }
    }

    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.series {
            Some(s) => format!(" {} ", s.title),
            None => " Price ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(series) = self.series.filter(|s| !s.closes.is_empty()) else {
            Paragraph::new(self.placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        };

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 || inner.width < 4 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // bottom row holds time labels
        let chart_width = inner.width as usize;

        let start = series.closes.len().saturating_sub(chart_width);
        let visible = &series.closes[start..];
        let visible_labels = &series.labels[start.min(series.labels.len())..];

        let min_price = visible.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_price = visible.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max_price - min_price;
        let range = if range < 0.001 { 1.0 } else { range };

        for (i, &price) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            let normalized = (price - min_price) / range;
            let y_pos = chart_height - 1
                - ((normalized * (chart_height - 1) as f64) as usize).min(chart_height - 1);
            buf.set_string(x, inner.y + y_pos as u16, "●", Style::default().fg(Color::Cyan));
        }

        let axis = Style::default().fg(Color::DarkGray);
        buf.set_string(inner.x, inner.y, format_price(max_price), axis);
        buf.set_string(
            inner.x,
            inner.y + chart_height as u16 - 1,
            format_price(min_price),
            axis,
        );

        let label_y = inner.y + inner.height - 1;
        if let Some(first) = visible_labels.first() {
            buf.set_string(inner.x, label_y, short_time_label(first), axis);
        }
        if let Some(last) = visible_labels.last() {
            let label = short_time_label(last);
            let width = label.chars().count() as u16;
            if width < inner.width {
                buf.set_string(inner.x + inner.width - width, label_y, label, axis);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_timestamps_are_shortened() {
        assert_eq!(short_time_label("2024-01-02 15:55:00"), "01-02 15:55");
        assert_eq!(short_time_label("yesterday"), "yesterday");
    }
}
