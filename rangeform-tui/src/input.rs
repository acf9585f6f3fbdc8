//! Keyboard input dispatch — overlays first, then global keys, then the
//! focused slider.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, ErrorCategory, Overlay};
use crate::widget::CommitOutcome;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
            app.next_field();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
            app.prev_field();
            return;
        }
        _ => {}
    }

    // 3. Focused-slider keys.
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => nudge(app, -1.0),
        KeyCode::Char('l') | KeyCode::Right => nudge(app, 1.0),
        KeyCode::Char('H') => nudge(app, -5.0),
        KeyCode::Char('L') => nudge(app, 5.0),
        KeyCode::Char(' ') => {
            if let Some(field) = app.fields.get_mut(app.focused) {
                field.toggle_handle();
            }
        }
        KeyCode::Enter => commit(app),
        _ => {}
    }
}

fn nudge(app: &mut AppState, steps: f64) {
    let Some(field) = app.fields.get_mut(app.focused) else {
        return;
    };
    let label = field.spec.label.clone();
    if let Err(err) = field.nudge(&mut app.store, steps) {
        app.push_error(ErrorCategory::Binding, err.to_string(), label);
    }
}

fn commit(app: &mut AppState) {
    let Some(field) = app.fields.get_mut(app.focused) else {
        return;
    };
    let label = field.spec.label.clone();
    match field.commit(&app.store, &mut app.actions) {
        CommitOutcome::Invoked(action) => {
            let runs = app.actions.count(&action);
            app.set_status(format!("Ran action {action} ({runs} total)"));
        }
        CommitOutcome::Failed(err) => {
            app.push_error(ErrorCategory::Action, err.to_string(), label);
        }
        CommitOutcome::Skipped => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
