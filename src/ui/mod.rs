mod board;
mod footer;
mod question;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

pub use board::Board;

/// Draw the whole presenter screen.
pub fn render(frame: &mut Frame, board: &Board, categories: &[String], active: &str) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_timer(frame, chunks[0], board.elapsed_seconds());
    question::render(frame, chunks[1], board);
    footer::render_status(frame, chunks[2], board.status());
    footer::render_categories(frame, chunks[3], categories, active);
    footer::render_controls(frame, chunks[4]);
}

fn render_timer(frame: &mut Frame, area: Rect, seconds: u64) {
    let widget = Paragraph::new(format!("Elapsed: {}s", seconds))
        .alignment(Alignment::Center)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(widget, area);
}
