use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::admin::{FormField, TaskForm};

pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm) {
    let draft = form.draft();
    let height = (draft.options.len() as u16 + 9).min(area.height);
    let area = centered(area, 70, height);

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Question / instruction",
            Style::default().fg(Color::DarkGray),
        )),
        input_line(
            "",
            &draft.instruction,
            form.focus() == FormField::Instruction,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Options (ctrl+t marks the correct one)",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    for (index, option) in draft.options.iter().enumerate() {
        let check = if option.is_correct { "[x] " } else { "[ ] " };
        lines.push(input_line(
            check,
            &option.text,
            form.focus() == FormField::Option(index),
        ));
    }

    lines.push(Line::from(""));
    lines.push(if form.is_submitting() {
        Line::from(Span::styled("Saving...", Style::default().fg(Color::Cyan)))
    } else {
        Line::from(Span::styled(
            "[enter] save  ·  [esc] cancel",
            Style::default().fg(Color::Green),
        ))
    });

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", form.title()))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn input_line<'a>(prefix: &'a str, text: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, style),
        Span::styled(prefix, style),
        Span::styled(text, style),
    ];
    if focused {
        spans.push(Span::styled("_", style));
    }
    Line::from(spans)
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
