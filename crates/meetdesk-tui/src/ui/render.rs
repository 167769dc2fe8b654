use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, AppState, FormFocus, Screen};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    match app.screen() {
        Screen::Dashboard => render_dashboard(frame, app, chunks[1]),
        Screen::MeetingForm => render_meeting_form(frame, app, chunks[1]),
        Screen::Login => render_login(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  meetdesk";
    let location = app
        .router
        .current()
        .map(|r| format!("{}  {}", r.title(), r.path))
        .unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled(title, app.theme.title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + location.len() + 4),
        )),
        Span::styled(location, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.screen() {
        Screen::Login => "[Enter] sign in | [Esc] quit",
        Screen::Dashboard => "[f]orm | [l]ogout | [?] help | [q]uit",
        Screen::MeetingForm => "[Tab] next field | [Esc] back",
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.is_authenticated() {
        format!(" Signed in, saved {} ", app.session_age_display())
    } else {
        " Not signed in ".to_string()
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let summary = vec![
        Line::from(vec![
            Span::styled(" Session: ", styles::muted_style()),
            Span::styled("active", app.theme.selected_style()),
        ]),
        Line::from(vec![
            Span::styled(" Drafted meetings: ", styles::muted_style()),
            Span::styled(app.meetings.len().to_string(), app.theme.text_style()),
        ]),
    ];
    let block = Block::default()
        .title(" Dashboard ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    frame.render_widget(Paragraph::new(summary).block(block), chunks[0]);

    let block = Block::default()
        .title(" Meetings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    if app.meetings.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No meetings yet. Press [f] to draft one.",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .meetings
        .iter()
        .map(|m| {
            let mut spans = vec![
                Span::styled(format!(" {}  ", m.date), styles::highlight_style()),
                Span::styled(m.title.clone(), app.theme.text_style()),
            ];
            if !m.notes.is_empty() {
                spans.push(Span::styled(format!("  {}", m.notes), styles::muted_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected_style());
    let mut state = ListState::default().with_selected(Some(app.meeting_selection));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_meeting_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let mut lines = vec![Line::from("")];

    let fields = [
        ("   Title: ", &form.title, FormFocus::Title),
        ("    Date: ", &form.date, FormFocus::Date),
        ("   Notes: ", &form.notes, FormFocus::Notes),
    ];
    for (label, value, focus) in fields {
        let focused = form.focus == focus;
        let style = if focused {
            app.theme.selected_style()
        } else {
            app.theme.text_style()
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(label, styles::muted_style()),
            Span::styled("[", styles::muted_style()),
            Span::styled(format!("{:<30}{}", value, cursor), style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    let submit = if form.focus == FormFocus::Submit {
        Span::styled(" ▶ Save ◀ ", app.theme.selected_style())
    } else {
        Span::styled("   Save   ", app.theme.text_style())
    };
    lines.push(Line::from(vec![Span::raw("             ["), submit, Span::raw("]")]));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("   {}", error), styles::error_style())));
    }

    let block = Block::default()
        .title(" New Meeting ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    // Fixed size dialog - compact
    let height = if app.login_error.is_some() { 10 } else { 8 };
    let dialog = centered_rect_fixed(50, height, area);

    // Clear the area
    frame.render_widget(Clear, dialog);

    let masked: String = "*".repeat(app.login_token.chars().count().min(24));
    let mut lines = vec![
        Line::from(Span::styled("  Sign in to meetdesk", app.theme.title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Token: [", styles::muted_style()),
            Span::styled(format!("{:<24}▌", masked), app.theme.selected_style()),
            Span::styled("]", styles::muted_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Paste an access token and press Enter",
            styles::muted_style(),
        )),
    ];

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", error), styles::error_style())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 12, frame.area());
    frame.render_widget(Clear, area);

    let entries = [
        ("f", "Draft a new meeting"),
        ("j/k", "Move selection"),
        ("d", "Remove selected meeting"),
        ("l", "Sign out"),
        ("Esc", "Back (in the form)"),
        ("q", "Quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("  Keyboard shortcuts", app.theme.title_style())),
        Line::from(""),
    ];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<6}", key), styles::help_key_style()),
            Span::styled(desc, app.theme.text_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", styles::muted_style()),
        Span::styled("[?]", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetdesk_core::config::Config;
    use meetdesk_core::storage::MemoryStorage;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect_fixed(46, 12, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));

        let rect = centered_rect_fixed(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 3, 10, 4));
    }

    #[test]
    fn test_login_screen_renders() {
        let mut app = App::with_storage(&Config::default(), Box::new(MemoryStorage::new()));
        app.start();
        let text = rendered_text(&app);
        assert!(text.contains("Sign in to meetdesk"));
        assert!(text.contains("/login"));
    }

    #[test]
    fn test_dashboard_renders_after_login() {
        let mut app = App::with_storage(&Config::default(), Box::new(MemoryStorage::new()));
        app.start();
        app.login_token = "abc".to_string();
        app.submit_login();

        let text = rendered_text(&app);
        assert!(text.contains("Dashboard"));
        assert!(text.contains("No meetings yet"));
        assert!(!text.contains("abc"));
    }
}
