use tui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::centered_rect;

pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, message: &str) {
    let lines = vec![
        Spans::from(Span::styled("\u{27f3}", Style::default().fg(Color::Blue))),
        Spans::from(Span::raw(message.to_string())),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("taskdesk"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, centered_rect(50, 4, area));
}
