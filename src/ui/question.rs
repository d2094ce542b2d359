use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::board::Board;

/// True/false questions are short; they get plain rather than bold text.
const TRUE_FALSE_CATEGORY: &str = "判断题";

pub fn render(frame: &mut Frame, area: Rect, board: &Board) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(4),
    ])
    .margin(1)
    .split(area);

    render_heading(frame, chunks[0], board);
    render_category(frame, chunks[1], board);
    render_question_text(frame, chunks[2], board);
    render_answer(frame, chunks[3], board.answer());
}

fn render_heading(frame: &mut Frame, area: Rect, board: &Board) {
    let heading = board
        .number()
        .map(|number| format!("Question #{}", number))
        .unwrap_or_default();
    let widget = Paragraph::new(heading).fg(Color::Cyan).bold();
    frame.render_widget(widget, area);
}

fn render_category(frame: &mut Frame, area: Rect, board: &Board) {
    let widget = Paragraph::new(board.category().unwrap_or_default()).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, board: &Board) {
    let style = if board.category() == Some(TRUE_FALSE_CATEGORY) {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::White).bold()
    };

    let widget = Paragraph::new(board.content().unwrap_or_default())
        .wrap(Wrap { trim: false })
        .style(style);
    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, answer: Option<&str>) {
    let Some(answer) = answer else {
        return;
    };

    let widget = Paragraph::new(Line::from(vec![
        Span::styled("Answer: ", Style::default().fg(Color::DarkGray)),
        Span::styled(answer, Style::default().fg(Color::Green).bold()),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
