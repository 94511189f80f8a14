use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::super::{Modal, ModalKind};

pub(in crate::tui_shell) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let (max_w, max_h) = match modal.kind {
        ModalKind::Editor { .. } => (120, area.height.saturating_sub(2)),
        _ => (90, 22),
    };
    let w = area.width.saturating_sub(6).clamp(20, max_w.max(20));
    let h = area.height.saturating_sub(4).clamp(8, max_h.max(8));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal_title(modal));
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    match &modal.kind {
        ModalKind::Viewer | ModalKind::ConfirmAction { .. } => {
            render_lines(frame, modal, inner);
        }

        ModalKind::TextInput { prompt, .. } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(inner);

            render_lines(frame, modal, parts[0]);

            let input_line = Line::from(vec![
                Span::styled(prompt.as_str(), Style::default().fg(Color::Yellow)),
                Span::raw(modal.input.buf.as_str()),
            ]);
            frame.render_widget(
                Paragraph::new(input_line)
                    .block(Block::default().borders(Borders::ALL).title("Edit")),
                parts[1],
            );

            let x = prompt.chars().count() as u16 + modal.input.cursor as u16;
            let y = parts[1].y + 1;
            frame.set_cursor_position((parts[1].x + 1 + x, y));
        }

        ModalKind::Editor { .. } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(modal.lines.len() as u16), Constraint::Min(1)])
                .split(inner);

            render_lines(frame, modal, parts[0]);

            let ed = &modal.editor;
            let height = parts[1].height as usize;
            let top = if height > 0 && ed.row >= height {
                ed.row + 1 - height
            } else {
                0
            };
            let shown: Vec<Line> = ed
                .lines
                .iter()
                .skip(top)
                .take(height)
                .map(|l| Line::from(l.as_str()))
                .collect();
            frame.render_widget(Paragraph::new(shown), parts[1]);

            let x = (ed.col as u16).min(parts[1].width.saturating_sub(1));
            let y = parts[1].y + (ed.row - top) as u16;
            frame.set_cursor_position((parts[1].x + x, y));
        }
    }
}

fn render_lines(frame: &mut ratatui::Frame, modal: &Modal, area: Rect) {
    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn modal_title(modal: &Modal) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            modal.title.as_str().to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  ".to_string()),
        Span::styled("Esc".to_string(), Style::default().fg(Color::Gray)),
    ];
    let submit = match &modal.kind {
        ModalKind::Viewer => None,
        ModalKind::ConfirmAction { .. } | ModalKind::TextInput { .. } => Some("Enter"),
        ModalKind::Editor { .. } => Some("Ctrl+S"),
    };
    if let Some(k) = submit {
        spans.push(Span::raw("  ".to_string()));
        spans.push(Span::styled(k.to_string(), Style::default().fg(Color::Gray)));
    }
    Line::from(spans)
}
