//! Terminal rendering. Every function here is a pure function of the view it
//! is handed; none of them mutate state or issue requests.

pub mod error_banner;
pub mod filter_bar;
pub mod modal;
pub mod pagination;
pub mod spinner;
pub mod task_list;

use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::Paragraph,
    Frame,
};

use crate::app::View;

const HELP: &str =
    "n new  e edit  space toggle  d delete  tab/1-3 filter  \u{2190}/\u{2192} page  q quit";

pub fn draw<B: Backend>(f: &mut Frame<B>, view: &View<'_>) {
    let state = view.state;
    if state.loading && state.tasks.is_empty() {
        spinner::render(f, f.size(), "Loading tasks...");
        return;
    }

    let banner = if state.error.is_some() { 4 } else { 0 };
    let pager = if state.total_pages > 1 { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(banner),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(pager),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_header(f, chunks[0]);
    error_banner::render(f, chunks[1], state.error.as_deref());
    filter_bar::render(f, chunks[2], state.filter);
    task_list::render(f, chunks[3], view);
    pagination::render(f, chunks[4], state.current_page, state.total_pages);
    f.render_widget(
        Paragraph::new(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
        chunks[5],
    );

    if let Some(form) = view.modal {
        modal::render(f, f.size(), form);
    }
}

fn render_header<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let lines = vec![
        Spans::from(Span::styled(
            "Task Manager",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(
            "Stay organized and get things done",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// A `width_pct` wide, `height` tall rectangle centred in `area`.
pub(crate) fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
