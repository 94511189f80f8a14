use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::session::{SessionMode, TOKEN_ENV};

use super::super::{RenderCtx, View, render_view_chrome};

/// Token entry. The token itself is typed on the input line below.
pub(in crate::tui_shell) struct LandingView<'a> {
    pub(in crate::tui_shell) mode: SessionMode,
    pub(in crate::tui_shell) loading: bool,
    pub(in crate::tui_shell) error: Option<&'a str>,
    pub(in crate::tui_shell) persisted: bool,
}

impl View for LandingView<'_> {
    fn title(&self) -> &str {
        "Welcome"
    }

    fn subtitle(&self) -> String {
        self.mode.label().to_string()
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), &self.subtitle(), area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "gistdeck",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Browse, edit and create your GitHub gists."),
            Line::from(""),
        ];

        let status = if self.mode == SessionMode::Initializing {
            "Checking for a saved token...".to_string()
        } else if self.loading {
            "Validating token...".to_string()
        } else {
            "Paste a personal access token with the gist scope and press Enter.".to_string()
        };
        lines.push(Line::from(Span::styled(
            status,
            Style::default().fg(Color::Cyan),
        )));

        if let Some(err) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        lines.push(Line::from(""));
        let note = if self.persisted {
            "The token is kept for 30 days in the state directory."
        } else {
            "Ephemeral session: the token is not saved."
        };
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("Tip: set {} to skip this screen.", TOKEN_ENV),
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false }),
            inner,
        );
    }
}
