use taskdesk_shared::Filter;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, current: Filter) {
    let titles = Filter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| Spans::from(Span::raw(format!("{} {}", i + 1, filter.label()))))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Filter"))
        .select(current.index())
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw(" "));
    f.render_widget(tabs, area);
}
