use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Only list-fetch failures ever reach this banner.
pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, error: Option<&str>) {
    let Some(message) = error else {
        return;
    };
    let red = Style::default().fg(Color::Red);
    let lines = vec![
        Spans::from(vec![
            Span::styled("Error: ", red.add_modifier(Modifier::BOLD)),
            Span::styled(message.to_string(), red),
        ]),
        Spans::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to Try Again"),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(red))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
