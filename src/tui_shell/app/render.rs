use super::*;

const LANDING_PROMPT: &str = "token>";
const DASHBOARD_HINT: &str =
    "/ search  n new  d describe  e edit  r rename  a add file  x delete  c copy  u url  R refresh  L logout  q quit";

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    // Header
    let mode = app.collection.mode();
    let mode_color = match mode {
        SessionMode::Authenticated => Color::Green,
        SessionMode::CredentialInvalid => Color::Red,
        _ => Color::Yellow,
    };
    let storage = match app.ctx.store.root() {
        Some(root) => root.display().to_string(),
        None => "(ephemeral)".to_string(),
    };
    let spans = vec![
        Span::styled(
            "gistdeck",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(mode.label(), Style::default().fg(mode_color)),
        Span::raw("  "),
        Span::raw(app.ctx.gateway.base_url().to_string()),
        Span::raw("  "),
        Span::styled(storage, Style::default().fg(Color::Gray)),
    ];
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    if app.on_landing() {
        LandingView {
            mode,
            loading: app.collection.is_loading(),
            error: app.collection.error(),
            persisted: app.persisted(),
        }
        .render(frame, chunks[1], &ctx);
    } else {
        DashboardView {
            collection: &app.collection,
            editor: app.editor.as_ref(),
            focus_file: app.focus_file,
        }
        .render(frame, chunks[1], &ctx);
    }

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{} ", r.ts), Style::default().fg(Color::Gray)),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Input line: the masked token on the landing screen, key hints elsewhere.
    let landing = app.on_landing();
    let input_line = if landing {
        let masked = "*".repeat(app.input.buf.chars().count());
        let mut spans = vec![
            Span::styled(LANDING_PROMPT, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(masked),
        ];
        if app.input.buf.is_empty() {
            spans.push(Span::styled(
                "paste a token, Enter to submit, Esc to quit",
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            ));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            DASHBOARD_HINT,
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ))
    };
    frame.render_widget(
        Paragraph::new(input_line).block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );

    if let Some(m) = &app.modal {
        dim_frame(frame);
        modal::draw_modal(frame, m);
        return;
    }

    if landing {
        let x = LANDING_PROMPT.len() as u16 + 1 + app.input.cursor as u16;
        let y = chunks[3].y + 1;
        frame.set_cursor_position((chunks[3].x + x, y));
    }
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
