//! Rendering. Pure functions of the app state.

mod admin;
mod form;
mod header;
mod tasks;

use ratatui::{prelude::*, widgets::Block, widgets::Paragraph};

use crate::app::{App, Route};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    header::render(frame, chunks[0], app);

    match app.route {
        Route::Tasks => tasks::render(frame, chunks[1], &app.quiz),
        Route::Admin => admin::render(frame, chunks[1], &app.admin),
    }

    render_controls(frame, chunks[2], app);

    if app.route == Route::Admin {
        if let Some(task_form) = app.admin.form() {
            form::render(frame, area, task_form);
        }
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = match app.route {
        Route::Tasks => "j/k option  ·  h/l task  ·  enter answer  ·  tab admin  ·  q quit",
        Route::Admin if app.admin.form().is_some() => {
            "↑/↓ field  ·  ctrl+t correct  ·  ctrl+n add  ·  ctrl+d remove  ·  enter save  ·  esc cancel"
        }
        Route::Admin => "j/k row  ·  n new  ·  e edit  ·  d delete  ·  r reload  ·  tab tasks  ·  q quit",
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
