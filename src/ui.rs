use ratatui::{prelude::*, widgets::*};

use crate::constants::NATION_PLACEHOLDER;
use crate::filter::SortOrder;
use crate::models::{Developer, Domain, NotificationLevel};

/// Talent rank with exactly one decimal digit
pub fn format_talent_rank(rank: f64) -> String {
    format!("{:.1}", rank)
}

/// Nation or the fixed placeholder
pub fn display_nation(nation: Option<&str>) -> &str {
    nation.unwrap_or(NATION_PLACEHOLDER)
}

pub fn domain_label(domain: Option<Domain>) -> &'static str {
    domain.map(|d| d.as_str()).unwrap_or("All Domains")
}

pub fn nation_label(nation: Option<&str>) -> &str {
    nation.unwrap_or("All Nations")
}

/// Screen column of a byte cursor inside `text`
pub fn cursor_column(text: &str, byte_pos: usize) -> u16 {
    text.get(..byte_pos)
        .map(|before| before.chars().count())
        .unwrap_or(0) as u16
}

/// Column header with a sort arrow
pub fn sort_header(title: &str, order: Option<SortOrder>) -> String {
    match order {
        Some(SortOrder::Ascending) => format!("{} ▲", title),
        Some(SortOrder::Descending) => format!("{} ▼", title),
        None => title.to_string(),
    }
}

/// Talent rank color
pub fn rank_color(rank: f64) -> Color {
    if rank >= 9.0 {
        Color::Green
    } else if rank >= 8.0 {
        Color::Cyan
    } else {
        Color::Yellow
    }
}

pub fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Info => Color::Cyan,
    }
}

/// Lines describing a developer, as shown in the result modal
pub fn developer_lines(dev: &Developer) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<11}", format!("{}:", label)), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };
    vec![
        field("Name", dev.name.clone()),
        field("Username", dev.username.clone()),
        field("TalentRank", format_talent_rank(dev.talent_rank)),
        field("Nation", display_nation(dev.nation.as_deref()).to_string()),
        field("Domain", dev.domain.as_str().to_string()),
    ]
}

/// Renders a one-line selector box
pub fn render_selector<'a>(title: &'a str, value: &'a str, is_focused: bool) -> Paragraph<'a> {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let arrows = if is_focused { "◀ " } else { "  " };
    let tail = if is_focused { " ▶" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::styled(arrows, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
        Span::styled(tail, Style::default().fg(Color::DarkGray)),
    ]))
    .block(block)
}

/// Centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
