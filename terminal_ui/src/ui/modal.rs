use taskdesk_shared::TITLE_MAX_CHARS;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::form::{Field, TaskForm};

fn field_block(label: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(label)
}

pub fn render<B: Backend>(f: &mut Frame<B>, area: Rect, form: &TaskForm) {
    let area = centered_rect(60, 16, area);
    f.render_widget(Clear, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            form.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let title_label = format!(
        "Title * ({}/{TITLE_MAX_CHARS})",
        form.title.chars().count()
    );
    let title = Paragraph::new(form.title.as_str())
        .block(field_block(&title_label, form.focus == Field::Title));
    f.render_widget(title, chunks[0]);

    let description = if form.description.is_empty() && form.focus != Field::Description {
        Text::styled(
            "Enter task description (optional)",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Text::raw(form.description.as_str())
    };
    let description = Paragraph::new(description)
        .block(field_block("Description", form.focus == Field::Description))
        .wrap(Wrap { trim: false });
    f.render_widget(description, chunks[1]);

    let submit_style = if form.can_submit() {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let footer = Spans::from(vec![
        Span::raw("Esc Cancel   "),
        Span::styled(format!(" Enter {} ", form.submit_label()), submit_style),
        Span::styled("   Tab switch field", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[2]);

    if !form.submitting {
        let (target, line, col) = match form.focus {
            Field::Title => (chunks[0], 0, form.title.chars().count()),
            Field::Description => {
                let last = form.description.rsplit('\n').next().unwrap_or("");
                (
                    chunks[1],
                    form.description.matches('\n').count(),
                    last.chars().count(),
                )
            }
        };
        let col = (col as u16).min(target.width.saturating_sub(3));
        let line = (line as u16).min(target.height.saturating_sub(3));
        f.set_cursor(target.x + 1 + col, target.y + 1 + line);
    }
}
