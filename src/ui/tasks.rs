use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::quiz::{CardState, OptionMark, TaskCard, TaskList, EMPTY_MESSAGE};
use crate::view::ViewState;

pub fn render(frame: &mut Frame, area: Rect, list: &TaskList) {
    let area = area.inner(Margin::new(2, 1));

    match list.cards() {
        ViewState::Loading => render_notice(frame, area, "Loading tasks...", Color::Yellow),
        ViewState::Failed(message) => render_failure(frame, area, message),
        ViewState::Loaded(cards) if cards.is_empty() => {
            render_notice(frame, area, EMPTY_MESSAGE, Color::Gray)
        }
        ViewState::Loaded(cards) => {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title + progress
                Constraint::Length(1), // Card strip
                Constraint::Length(1),
                Constraint::Fill(1), // Focused card
            ])
            .split(area);

            render_progress(frame, chunks[0], list.focused(), cards.len());
            render_strip(frame, chunks[1], cards, list.focused());
            render_card(frame, chunks[3], &cards[list.focused()]);
        }
    }
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(text).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, chunks[1]);
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str) {
    let widget = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red)
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, Rect { height: area.height.min(3), ..area });
}

fn render_progress(frame: &mut Frame, area: Rect, focused: usize, total: usize) {
    let line = Line::from(vec![
        Span::styled("Worksheet Tasks", Style::default().fg(Color::White).bold()),
        Span::styled(
            format!("   {}/{}", focused + 1, total),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One dot per card, coloured by its answer state.
fn render_strip(frame: &mut Frame, area: Rect, cards: &[TaskCard], focused: usize) {
    let spans: Vec<Span> = cards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let color = match card.state() {
                CardState::Idle => Color::DarkGray,
                CardState::Submitting { .. } => Color::Cyan,
                CardState::Answered { result, .. } if result.is_correct => Color::Green,
                CardState::Answered { .. } => Color::Red,
                CardState::Failed { .. } => Color::Yellow,
            };
            let symbol = if index == focused { "◉ " } else { "● " };
            Span::styled(symbol, Style::default().fg(color))
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_card(frame: &mut Frame, area: Rect, card: &TaskCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let task = card.task();
    let option_rows = (task.options.len() * 2) as u16;

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(option_rows),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(inner);

    let instruction = Paragraph::new(task.instruction.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(instruction, chunks[0]);

    render_options(frame, chunks[1], card);
    render_feedback(frame, chunks[3], card);
}

fn render_options(frame: &mut Frame, area: Rect, card: &TaskCard) {
    let show_cursor = matches!(card.state(), CardState::Idle | CardState::Failed { .. });
    let mut lines: Vec<Line> = Vec::with_capacity(card.task().options.len() * 2);

    for (index, option) in card.task().options.iter().enumerate() {
        let at_cursor = show_cursor && index == card.cursor();
        let mark = card.mark(option);

        let (style, suffix) = match mark {
            OptionMark::Pending => (Style::default().fg(Color::Cyan).bold(), "  ..."),
            OptionMark::SelectedCorrect => (Style::default().fg(Color::Green).bold(), "  ✓"),
            OptionMark::SelectedWrong => (Style::default().fg(Color::Red).bold(), "  ✗"),
            OptionMark::Revealed => (Style::default().fg(Color::Green), ""),
            OptionMark::Plain if at_cursor => (Style::default().fg(Color::Yellow).bold(), ""),
            OptionMark::Plain => (Style::default().fg(Color::Gray), ""),
        };
        let marker = if at_cursor { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(suffix, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, card: &TaskCard) {
    let widget = match (card.state(), card.feedback()) {
        (CardState::Submitting { .. }, _) => Paragraph::new("Submitting...").fg(Color::Cyan),
        (_, Some((message, is_correct))) => {
            let color = if is_correct { Color::Green } else { Color::Red };
            Paragraph::new(message).wrap(Wrap { trim: true }).fg(color).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(color)
                    .padding(Padding::horizontal(1)),
            )
        }
        _ => return,
    };

    frame.render_widget(widget, Rect { height: area.height.min(3), ..area });
}
