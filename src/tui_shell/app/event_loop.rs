use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_background();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            if app.worker.in_flight() > 0 {
                tracing::info!(
                    in_flight = app.worker.in_flight(),
                    "quitting with calls in flight"
                );
            }
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    if app.on_landing() {
        handle_landing_key(app, key);
    } else {
        handle_dashboard_key(app, key);
    }
}

fn handle_landing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.input.buf.is_empty() {
                app.quit = true;
            } else {
                app.input.clear();
            }
        }
        KeyCode::Enter => app.submit_token(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
        }
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::Tab => app.cycle_focus_file(1),
        KeyCode::BackTab => app.cycle_focus_file(-1),
        KeyCode::Enter | KeyCode::Char('o') => app.show_details(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('n') => app.start_create(),
        KeyCode::Char('d') => app.start_description_edit(),
        KeyCode::Char('x') | KeyCode::Delete => app.start_delete(),
        KeyCode::Char('e') => app.start_content_edit(),
        KeyCode::Char('r') => app.start_rename(),
        KeyCode::Char('a') => app.start_add_file(),
        KeyCode::Char('c') => app.copy_content(),
        KeyCode::Char('u') => app.copy_url(),
        KeyCode::Char('R') => app.refresh(),
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}
