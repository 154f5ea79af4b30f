use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use taskdesk_shared::Task;
use tui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{Pending, View};

const UNKNOWN_DATE: &str = "Invalid Date";

pub fn format_created<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

fn item<'a>(task: &'a Task, pending: Option<Pending>) -> ListItem<'a> {
    let (checkbox, title_style, body_style) = if task.is_completed {
        (
            "[x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        ("[ ] ", Style::default().fg(Color::White), Style::default().fg(Color::Gray))
    };

    let mut title = vec![
        Span::styled(checkbox, Style::default().fg(Color::Blue)),
        Span::styled(task.title.as_str(), title_style),
    ];
    match pending {
        Some(Pending::Updating) => title.push(Span::styled("  Updating...", Style::default().fg(Color::Yellow))),
        Some(Pending::Deleting) => title.push(Span::styled("  Deleting...", Style::default().fg(Color::Red))),
        None => {}
    }

    let mut lines = vec![Spans::from(title)];
    if let Some(description) = task.description_text() {
        lines.extend(
            description
                .lines()
                .map(|line| Spans::from(Span::styled(format!("    {line}"), body_style))),
        );
    }
    let created = task
        .created_at
        .map(|at| format_created(&at.with_timezone(&Local)))
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());
    lines.push(Spans::from(Span::styled(
        format!("    Created: {created}"),
        Style::default().fg(Color::DarkGray),
    )));
    ListItem::new(Text::from(lines))
}

pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, view: &View<'_>) {
    let state = view.state;
    let mut title = format!("Tasks ({})", state.scope_label());
    if state.loading {
        title.push_str(" \u{27f3}");
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.tasks.is_empty() {
        let empty = Paragraph::new(Span::styled(
            state.empty_message(),
            Style::default().fg(Color::Gray),
        ))
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .tasks
        .iter()
        .map(|task| item(task, view.pending.get(&task.id).copied()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(view.selected.min(state.tasks.len() - 1)));
    f.render_stateful_widget(list, area, &mut list_state);
}
