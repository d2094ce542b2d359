use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_status(frame: &mut Frame, area: Rect, status: &str) {
    let widget = Paragraph::new(status)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::Yellow)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

/// One numbered entry per category, the active one highlighted.
pub fn render_categories(frame: &mut Frame, area: Rect, categories: &[String], active: &str) {
    let mut spans: Vec<Span> = Vec::with_capacity(categories.len() * 2);

    for (index, category) in categories.iter().enumerate() {
        let style = if category == active {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        spans.push(Span::styled(format!(" {} {} ", index + 1, category), style));
        spans.push(Span::raw(" "));
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub fn render_controls(frame: &mut Frame, area: Rect) {
    let widget =
        Paragraph::new("enter draw  ·  a answer  ·  1-9/tab category  ·  q close")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
