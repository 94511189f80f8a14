use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::collection::CollectionState;
use crate::editing::{FilePhase, ItemEditor};

use super::super::{RenderCtx, View, fmt_date, fmt_since, render_view_chrome};

pub(in crate::tui_shell) struct DashboardView<'a> {
    pub(in crate::tui_shell) collection: &'a CollectionState,
    pub(in crate::tui_shell) editor: Option<&'a ItemEditor>,
    pub(in crate::tui_shell) focus_file: usize,
}

impl View for DashboardView<'_> {
    fn title(&self) -> &str {
        "Gists"
    }

    fn subtitle(&self) -> String {
        let total = self.collection.records().len();
        let shown = self.collection.visible().len();
        let mut s = if shown == total {
            format!("{} total", total)
        } else {
            format!("{} of {}", shown, total)
        };
        if self.collection.is_loading() {
            s.push_str("  refreshing...");
        }
        if self.collection.is_creating() {
            s.push_str("  creating...");
        }
        s
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), &self.subtitle(), area);
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(inner);

        self.render_list(frame, parts[0]);
        self.render_detail(frame, parts[1], ctx);
    }
}

impl DashboardView<'_> {
    fn render_list(&self, frame: &mut ratatui::Frame, area: Rect) {
        let visible = self.collection.visible();
        let selected = self.collection.selected_id();

        let mut state = ListState::default();
        state.select(
            selected.and_then(|id| visible.iter().position(|g| g.id == id)),
        );

        let mut rows = Vec::new();
        for g in &visible {
            let marker = if g.is_public { " " } else { "*" };
            let mut row = format!("{} {}", marker, g.title());
            if self.collection.is_pending(&g.id) {
                row.push_str("  ...");
            }
            let count = g.files.len();
            let label = if count == 1 { "file" } else { "files" };
            rows.push(ListItem::new(vec![
                Line::from(row),
                Line::from(Span::styled(
                    format!("    {} {}  {}", count, label, fmt_date(&g.updated_at)),
                    Style::default().fg(Color::Gray),
                )),
            ]));
        }
        if rows.is_empty() {
            let empty = if self.collection.search().is_empty() {
                "(no gists yet; press n to create one)"
            } else {
                "(no gists match the search)"
            };
            rows.push(ListItem::new(empty));
        }

        let title = if self.collection.search().is_empty() {
            "list (/: search; *: secret)".to_string()
        } else {
            format!("search={}", self.collection.search())
        };
        let list = List::new(rows)
            .block(Block::default().borders(Borders::RIGHT).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_detail(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let Some(ed) = self.editor else {
            frame.render_widget(Paragraph::new("(no selection)"), area);
            return;
        };
        let g = ed.record();

        let mut out = Vec::new();
        out.push(Line::from(Span::styled(
            g.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        out.push(Line::from(format!(
            "{}  created {}  updated {}",
            if g.is_public { "public" } else { "secret" },
            fmt_date(&g.created_at),
            fmt_since(&g.updated_at, ctx.now),
        )));
        if let Some(d) = ed.description_edit()
            && d.updating
        {
            out.push(Line::from(Span::styled(
                "updating description...",
                Style::default().fg(Color::Cyan),
            )));
        }
        out.push(Line::from(Span::styled(
            g.html_url.clone(),
            Style::default().fg(Color::Blue),
        )));
        out.push(Line::from(""));

        if g.files.is_empty() {
            let line = match ed.new_file_draft() {
                Some(d) if d.saving => "adding file...",
                _ => "(no files; press a to add one)",
            };
            out.push(Line::from(line));
        }

        let focused = g.files.keys().nth(self.focus_file);
        for name in g.files.keys() {
            let is_focus = Some(name) == focused;
            let phase = match ed.file_phase(name) {
                FilePhase::Viewing => "",
                FilePhase::Editing => "  [unsaved edit]",
                FilePhase::Saving => "  [saving...]",
            };
            let style = if is_focus {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            out.push(Line::from(vec![
                Span::styled(
                    format!("{} {}", if is_focus { ">" } else { " " }, name),
                    style,
                ),
                Span::styled(phase, Style::default().fg(Color::Cyan)),
            ]));
        }
        if let Some(r) = ed.rename()
            && ed.is_loading_content()
        {
            out.push(Line::from(Span::styled(
                format!("renaming {} to {}...", r.original, r.buffer.trim()),
                Style::default().fg(Color::Cyan),
            )));
        }

        if let Some(name) = focused
            && let Some(file) = g.files.get(name)
        {
            out.push(Line::from(""));
            let mut meta = format!("{} bytes", file.size);
            if let Some(lang) = &file.language {
                meta = format!("{}  {}", lang, meta);
            }
            out.push(Line::from(Span::styled(
                meta,
                Style::default().fg(Color::Gray),
            )));
            match &file.content {
                Some(c) if c.is_empty() => out.push(Line::from("(empty; press e to add content)")),
                Some(c) => out.extend(c.lines().map(|l| Line::from(l.to_string()))),
                None if ed.is_loading_content() => out.push(Line::from("loading content...")),
                None => out.push(Line::from("(content not loaded)")),
            }
        }

        frame.render_widget(Paragraph::new(out).wrap(Wrap { trim: false }), area);
    }
}
