//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{can_add_field_char, can_add_token_char, App, AppState, FormFocus, Screen};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Any key press dismisses the last status message
    app.status_message = None;

    match app.screen() {
        Screen::Login => handle_login_input(app, key),
        Screen::Dashboard => handle_dashboard_input(app, key),
        Screen::MeetingForm => handle_form_input(app, key),
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Enter => {
            app.submit_login();
        }
        KeyCode::Backspace => {
            app.login_token.pop();
        }
        KeyCode::Char(c) => {
            if can_add_token_char(app.login_token.len(), c) {
                app.login_token.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('f') | KeyCode::Char('n') => app.open_meeting_form(),
        KeyCode::Char('l') => app.logout(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next_meeting(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_meeting(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_meeting(),
        _ => {}
    }
    Ok(false)
}

fn handle_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Down | KeyCode::Tab => {
            app.form.focus = app.form.focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.form.focus = app.form.focus.prev();
        }
        KeyCode::Enter => {
            if app.form.focus == FormFocus::Submit {
                app.submit_meeting();
            } else {
                app.form.focus = app.form.focus.next();
            }
        }
        KeyCode::Backspace => {
            if let Some((field, _)) = app.form.focused_field_mut() {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some((field, max_len)) = app.form.focused_field_mut() {
                if can_add_field_char(field.chars().count(), max_len, c) {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}
