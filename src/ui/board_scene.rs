//! Board screen rendering.

use super::{CardFace, TerminalView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the whole board screen.
pub fn render_board_scene(frame: &mut Frame, view: &TerminalView) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    // Grid on the left, info panel on the right
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    render_grid(frame, chunks[0], view);
    render_info_panel(frame, chunks[1], view);

    if let Some((score, moves)) = view.game_over {
        render_game_over_banner(frame, chunks[0], score, moves);
    }
}

fn render_grid(frame: &mut Frame, area: Rect, view: &TerminalView) {
    let block = Block::default()
        .title(" Pairs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Each card is 3 chars wide plus a gap, one row tall plus a gap
    let grid_width = (view.width * 4) as u16;
    let grid_height = (view.height * 2) as u16;
    let x_offset = inner.x + inner.width.saturating_sub(grid_width) / 2;
    let y_offset = inner.y + inner.height.saturating_sub(grid_height) / 2;

    for row in 0..view.height {
        let mut spans = Vec::with_capacity(view.width as usize);
        for col in 0..view.width {
            let index = (row * view.width + col) as usize;
            let card = view.cards.get(index).copied().unwrap_or_default();
            let is_cursor = view.cursor == (row, col) && view.game_over.is_none();
            spans.push(Span::styled(
                format!("[{}] ", card.glyph()),
                card_style(&card, is_cursor),
            ));
        }

        let y = y_offset + (row * 2) as u16;
        if y >= inner.y + inner.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y, grid_width.min(inner.width), 1),
        );
    }
}

fn card_style(card: &CardFace, is_cursor: bool) -> Style {
    let mut style = if card.matched {
        Style::default().fg(Color::Green)
    } else if card.face_up {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    if is_cursor {
        style = style.bg(Color::DarkGray);
    }
    style
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &TerminalView) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let combo_color = if view.combo > 0 {
        Color::Magenta
    } else {
        Color::White
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Pairs",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        stat_line("Grid: ", format!("{}x{}", view.width, view.height)),
        stat_line("Score: ", view.score.to_string()),
        Line::from(vec![
            Span::styled("Combo: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("x{}", view.combo), Style::default().fg(combo_color)),
        ]),
        stat_line("Moves: ", view.total_moves.to_string()),
        Line::from(""),
        Line::from(Span::styled(view.cue, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            view.status.clone(),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
    ];

    for help in [
        "[Arrows] Move",
        "[Enter] Flip",
        "[S] Save",
        "[N] New game",
        "[G] Next grid size",
        "[Q] Save and quit",
    ] {
        lines.push(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over_banner(frame: &mut Frame, area: Rect, score: u32, moves: u32) {
    let banner_height: u16 = 4;
    let banner_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(banner_height),
        width: area.width,
        height: banner_height.min(area.height),
    };
    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "ALL PAIRS FOUND",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" - {} points in {} moves", score, moves)),
        ]),
        Line::from(Span::styled(
            "[N] Play again  [Q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
