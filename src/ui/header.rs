use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Route};

const PRODUCT_TITLE: &str = "Virtual Front Desk";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Color::DarkGray);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(PRODUCT_TITLE, Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  {}", app.api_url), Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(title, chunks[0]);

    let nav: Vec<Span> = [Route::Tasks, Route::Admin]
        .into_iter()
        .flat_map(|route| {
            let style = if route == app.route {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", route.title()), style), Span::raw(" ")]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(nav)).alignment(Alignment::Right),
        chunks[1],
    );
}
