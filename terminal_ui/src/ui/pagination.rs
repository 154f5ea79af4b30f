use std::ops::RangeInclusive;

use tui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_VISIBLE: u32 = 5;

/// Page numbers shown between the previous/next controls.
pub fn page_window(current: u32, total: u32) -> RangeInclusive<u32> {
    if total <= MAX_VISIBLE {
        return 1..=total.max(1);
    }
    let start = current.saturating_sub(2).max(1);
    let end = total.min(start + MAX_VISIBLE - 1);
    start..=end
}

pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, current: u32, total: u32) {
    if total <= 1 {
        return;
    }
    let enabled = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "\u{2190} Previous",
        if current > 1 { enabled } else { disabled },
    )];
    for page in page_window(current, total) {
        spans.push(Span::raw("  "));
        if page == current {
            spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(format!(" {page} ")));
        }
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        "Next \u{2192}",
        if current < total { enabled } else { disabled },
    ));

    let paragraph = Paragraph::new(Spans::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
