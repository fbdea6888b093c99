use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::projection::SummaryRecord;

pub struct StatusBar<'a> {
    pub symbol: Option<&'a str>,
    pub phase: &'a str,
    pub cooldown_secs: Option<u64>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let phase_color = match self.phase {
            "READY" => Color::Green,
            "FETCHING" => Color::Yellow,
            "FAILED" | "COOLDOWN" => Color::Red,
            _ => Color::DarkGray,
        };

        let mut spans = vec![
            Span::styled(
                " intraday-forecast ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.symbol.unwrap_or("---"), Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.phase,
                Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(secs) = self.cooldown_secs {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("unlocks in {}s", secs),
                Style::default().fg(Color::Yellow),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

pub struct SearchBar<'a> {
    pub input: &'a str,
    pub locked: bool,
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, border) = if self.locked {
            (" Search (locked) ", Color::Red)
        } else {
            (" Search ", Color::Cyan)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let line = Line::from(vec![
            Span::styled(self.input, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(line).block(block).render(area, buf);
    }
}

pub struct SuggestionList<'a> {
    items: &'a [String],
    selected: Option<usize>,
}

impl<'a> SuggestionList<'a> {
    pub fn new(items: &'a [String], selected: Option<usize>) -> Self {
        Self { items, selected }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if Some(i) == self.selected {
                    Line::from(Span::styled(
                        format!("> {}", label),
                        Style::default().fg(Color::Black).bg(Color::Cyan),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}", label),
                        Style::default().fg(Color::White),
                    ))
                }
            })
            .collect();

        let block = Block::default()
            .title(" Suggestions ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct SummaryPanel<'a> {
    summary: Option<&'a SummaryRecord>,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(summary: Option<&'a SummaryRecord>) -> Self {
        Self { summary }
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Prices ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let lines: Vec<Line> = match self.summary {
            Some(summary) => SummaryRecord::HEADERS
                .iter()
                .zip(summary.cells())
                .map(|(header, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<9}", format!("{}:", header)),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(value, Style::default().fg(Color::White)),
                    ])
                })
                .collect(),
            None => vec![Line::from(Span::styled(
                "---",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let visible = block.inner(area).height as usize;
        let start = self.messages.len().saturating_sub(visible);

        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[ERR]") {
                    Color::Red
                } else if msg.starts_with("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(" [Enter]", key),
            Span::styled(" search  ", text),
            Span::styled("[Tab]", key),
            Span::styled(" complete  ", text),
            Span::styled("[Ctrl+P]", key),
            Span::styled(" predict  ", text),
            Span::styled("[Esc]", key),
            Span::styled(" close  ", text),
            Span::styled("[Ctrl+Q]", key),
            Span::styled(" quit", text),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
