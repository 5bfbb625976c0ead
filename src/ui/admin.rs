use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::admin::{AdminManager, EMPTY_MESSAGE};
use crate::models::Task;
use crate::view::ViewState;

const INSTRUCTION_PREVIEW_LENGTH: usize = 50;

pub fn render(frame: &mut Frame, area: Rect, admin: &AdminManager) {
    let area = area.inner(Margin::new(2, 1));
    let banner_height = if admin.error().is_some() { 3 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(banner_height),
        Constraint::Fill(1),
    ])
    .split(area);

    render_title(frame, chunks[0]);
    if let Some(message) = admin.error() {
        render_banner(frame, chunks[1], message);
    }

    match admin.tasks() {
        ViewState::Loading => {
            let widget = Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .fg(Color::Yellow);
            frame.render_widget(widget, chunks[2]);
        }
        // The banner already carries the message.
        ViewState::Failed(_) => {}
        ViewState::Loaded(tasks) if tasks.is_empty() => {
            let widget = Paragraph::new(EMPTY_MESSAGE)
                .alignment(Alignment::Center)
                .fg(Color::Gray)
                .block(Block::default().padding(Padding::vertical(1)));
            frame.render_widget(widget, chunks[2]);
        }
        ViewState::Loaded(tasks) => render_rows(frame, chunks[2], admin, tasks),
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Admin: tasks", Style::default().fg(Color::White).bold()),
        Span::styled("   [n] add task", Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_banner(frame: &mut Frame, area: Rect, message: &str) {
    let widget = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .fg(Color::Red)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_rows(frame: &mut Frame, area: Rect, admin: &AdminManager, tasks: &[Task]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let is_selected = index == admin.selected();
            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(if is_selected { "> " } else { "  " }, style),
                Span::styled(truncate(&task.instruction), style),
                Span::styled(
                    format!("  ({} options)", task.options.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            if admin.delete_confirm() == Some(task.id) {
                spans.push(Span::styled(
                    "  Delete? [d] yes  [esc] no",
                    Style::default().fg(Color::Red).bold(),
                ));
            }

            Line::from(spans)
        })
        .collect();

    let visible = inner.height as usize;
    let scroll = (admin.selected() + 1).saturating_sub(visible);

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate(text: &str) -> String {
    if text.chars().count() > INSTRUCTION_PREVIEW_LENGTH {
        let head: String = text.chars().take(INSTRUCTION_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
