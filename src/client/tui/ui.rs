use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::client::sanitize_text;
use crate::client::NoticeKind;
use crate::domain::Theme;

use super::{App, FocusPane};

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::DarkGray,
        },
        Theme::Dark => Palette {
            fg: Color::Gray,
            bg: Color::Black,
            accent: Color::Cyan,
            muted: Color::DarkGray,
        },
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let colors = palette(app.controller.theme());
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(app, frame, rows[0], &colors);
    render_input(app, frame, rows[1], &colors);

    let panes =
        Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).split(rows[2]);
    render_answer(app, frame, panes[0], &colors);
    render_history(app, frame, panes[1], &colors);

    render_status(app, frame, rows[3], &colors);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let header = Line::from(vec![
        Span::styled(
            " Answerbox ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("— ask anything", Style::default().fg(colors.muted)),
        Span::raw("  "),
        Span::styled(
            app.controller.theme().glyph(),
            Style::default().fg(colors.fg),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let focused = app.focus == FocusPane::Input;
    let border = if focused { colors.accent } else { colors.muted };

    let input = Paragraph::new(app.controller.input())
        .style(Style::default().fg(colors.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Ask "),
        );
    frame.render_widget(input, area);

    if focused {
        let x = area.x + 1 + (app.controller.cursor() as u16).min(area.width.saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_answer(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.muted))
        .title(" Response ");

    let paragraph = if app.controller.is_loading() {
        let dots = ".".repeat(app.controller.loader_frame() as usize + 1);
        Paragraph::new(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::ITALIC),
        )))
    } else if app.controller.panel_visible() {
        Paragraph::new(sanitize_text(app.controller.shown_answer()))
            .style(Style::default().fg(colors.fg))
            .wrap(Wrap { trim: false })
    } else {
        Paragraph::new(Line::from(Span::styled(
            "Type a question and press Enter.",
            Style::default().fg(colors.muted),
        )))
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_history(app: &mut App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let focused = app.focus == FocusPane::History;
    let border = if focused { colors.accent } else { colors.muted };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" History ");

    let entries = app.controller.history().entries();
    if entries.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No history yet — try a search",
            Style::default().fg(colors.muted),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    sanitize_text(entry.query()),
                    Style::default()
                        .fg(colors.fg)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    short_timestamp(entry.timestamp()),
                    Style::default().fg(colors.muted),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, area, &mut app.history_state);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let line = if app.controller.confirm_clear_pending() {
        Line::from(Span::styled(
            " Clear search history? y/n",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(notice) = app.controller.notice() {
        let style = match notice.kind() {
            NoticeKind::Info => Style::default().fg(colors.accent),
            NoticeKind::Warning => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        };
        Line::from(Span::styled(format!(" {}", notice.text()), style))
    } else {
        Line::from(Span::styled(
            " Enter ask · Tab history · ^Y copy · ^S save · ^L clear · ^T theme · Esc quit",
            Style::default().fg(colors.muted),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// `2026-08-05T12:34:56.789Z` → `2026-08-05 12:34:56`
fn short_timestamp(ts: &str) -> String {
    ts.chars().take(19).collect::<String>().replace('T', " ")
}
