//! Application state management for meetdesk.
//!
//! This module contains the `App` struct that owns the session store, the
//! router, and all screen state. Every screen change goes through the router,
//! so the navigation guard sees each transition.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info};

use meetdesk_core::config::Config;
use meetdesk_core::router::{DASHBOARD, MEETING_FORM};
use meetdesk_core::theme::ThemePreset;
use meetdesk_core::{Router, SessionStore, Storage};

use crate::ui::styles::Theme;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable that establishes a session at startup
pub const TOKEN_ENV: &str = "MEETDESK_TOKEN";

/// Maximum length for the token input.
/// Bearer tokens and JWTs from common providers stay well under this.
const MAX_TOKEN_LENGTH: usize = 4096;

/// Maximum length for the meeting title.
const MAX_TITLE_LENGTH: usize = 80;

/// Maximum length for meeting notes.
const MAX_NOTES_LENGTH: usize = 500;

/// Date format accepted by the meeting form
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// UI State Types
// ============================================================================

/// Screen shown for the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    MeetingForm,
    Login,
}

impl Screen {
    pub fn from_route(name: Option<&str>) -> Self {
        match name {
            Some(DASHBOARD) => Screen::Dashboard,
            Some(MEETING_FORM) => Screen::MeetingForm,
            _ => Screen::Login,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Meeting form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Title,
    Date,
    Notes,
    Submit,
}

impl FormFocus {
    pub fn next(&self) -> Self {
        match self {
            FormFocus::Title => FormFocus::Date,
            FormFocus::Date => FormFocus::Notes,
            FormFocus::Notes => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormFocus::Title => FormFocus::Submit,
            FormFocus::Date => FormFocus::Title,
            FormFocus::Notes => FormFocus::Date,
            FormFocus::Submit => FormFocus::Notes,
        }
    }
}

/// A meeting drafted through the form during this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDraft {
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct MeetingFormState {
    pub title: String,
    pub date: String,
    pub notes: String,
    pub focus: FormFocus,
    pub error: Option<String>,
}

impl Default for MeetingFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: Utc::now().date_naive().format(DATE_FORMAT).to_string(),
            notes: String::new(),
            focus: FormFocus::Title,
            error: None,
        }
    }
}

impl MeetingFormState {
    /// The text field under focus, if any
    pub fn focused_field_mut(&mut self) -> Option<(&mut String, usize)> {
        match self.focus {
            FormFocus::Title => Some((&mut self.title, MAX_TITLE_LENGTH)),
            FormFocus::Date => Some((&mut self.date, DATE_FORMAT_LENGTH)),
            FormFocus::Notes => Some((&mut self.notes, MAX_NOTES_LENGTH)),
            FormFocus::Submit => None,
        }
    }

    fn validate(&self) -> Result<MeetingDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| "Date must look like 2024-05-31".to_string())?;
        Ok(MeetingDraft {
            title: title.to_string(),
            date,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Length of a date written in `DATE_FORMAT`
const DATE_FORMAT_LENGTH: usize = 10;

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub session: SessionStore,
    pub router: Router,
    pub theme: Theme,

    pub state: AppState,

    // Login form state
    pub login_token: String,
    pub login_error: Option<String>,

    // Meeting form state
    pub form: MeetingFormState,
    pub meetings: Vec<MeetingDraft>,
    pub meeting_selection: usize,

    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance backed by the configured storage
    pub fn new(config: Config) -> Result<Self> {
        debug!(?config, "Creating app");

        let storage = config.open_storage()?;
        let mut app = Self::with_storage(&config, storage);

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                info!("Establishing session from {}", TOKEN_ENV);
                app.session.establish(token);
            }
        }

        Ok(app)
    }

    /// Build an app around an explicit storage backend. The session is
    /// rehydrated from it immediately.
    pub fn with_storage(config: &Config, storage: Box<dyn Storage>) -> Self {
        let session = SessionStore::open(storage);
        let theme = Theme::new(&ThemePreset::default(), config.color_scheme);

        Self {
            session,
            router: Router::default(),
            theme,
            state: AppState::Normal,
            login_token: String::new(),
            login_error: None,
            form: MeetingFormState::default(),
            meetings: Vec::new(),
            meeting_selection: 0,
            status_message: None,
        }
    }

    /// Initial navigation. The guard sends anonymous users to the login screen.
    pub fn start(&mut self) {
        self.navigate(DASHBOARD);
    }

    pub fn screen(&self) -> Screen {
        Screen::from_route(self.router.current_name())
    }

    /// Navigate through the router; the session is lent to the guard.
    pub fn navigate(&mut self, name: &str) {
        if let Err(e) = self.router.push(name, &self.session) {
            error!(error = %e, route = name, "Navigation failed");
            self.status_message = Some(e.to_string());
        }
    }

    pub fn go_back(&mut self) {
        match self.router.back(&self.session) {
            Ok(Some(_)) => {}
            Ok(None) => self.navigate(DASHBOARD),
            Err(e) => {
                error!(error = %e, "Back navigation failed");
                self.status_message = Some(e.to_string());
            }
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Establish a session from the login form and move on to the dashboard
    pub fn submit_login(&mut self) {
        let token = self.login_token.trim().to_string();
        if token.is_empty() {
            self.login_error = Some("Access token required".to_string());
            return;
        }

        self.session.establish(token);
        self.login_token.clear();
        self.login_error = None;
        self.navigate(DASHBOARD);
    }

    /// Drop the session and let the guard move us off protected screens
    pub fn logout(&mut self) {
        self.session.clear();
        self.meetings.clear();
        self.meeting_selection = 0;
        self.form = MeetingFormState::default();

        if let Err(e) = self.router.reload(&self.session) {
            error!(error = %e, "Failed to re-run guard after logout");
        }
        self.status_message = Some("Signed out".to_string());
    }

    /// Human-readable age of the persisted session snapshot
    pub fn session_age_display(&self) -> String {
        match self.session.saved_at() {
            Some(saved_at) => age_display(saved_at, Utc::now()),
            None => "never".to_string(),
        }
    }

    // =========================================================================
    // Meetings
    // =========================================================================

    pub fn open_meeting_form(&mut self) {
        self.form = MeetingFormState::default();
        self.navigate(MEETING_FORM);
    }

    /// Validate the form and add a draft. Returns to the dashboard on success.
    pub fn submit_meeting(&mut self) {
        match self.form.validate() {
            Ok(draft) => {
                info!(title = %draft.title, date = %draft.date, "Meeting drafted");
                self.status_message = Some(format!("Drafted \"{}\"", draft.title));
                self.meetings.push(draft);
                self.meetings.sort_by_key(|m| m.date);
                self.form = MeetingFormState::default();
                self.navigate(DASHBOARD);
            }
            Err(message) => {
                self.form.error = Some(message);
            }
        }
    }

    pub fn select_next_meeting(&mut self) {
        if !self.meetings.is_empty() {
            self.meeting_selection = (self.meeting_selection + 1).min(self.meetings.len() - 1);
        }
    }

    pub fn select_prev_meeting(&mut self) {
        self.meeting_selection = self.meeting_selection.saturating_sub(1);
    }

    pub fn delete_selected_meeting(&mut self) {
        if self.meeting_selection < self.meetings.len() {
            let removed = self.meetings.remove(self.meeting_selection);
            self.status_message = Some(format!("Removed \"{}\"", removed.title));
            self.meeting_selection = self
                .meeting_selection
                .min(self.meetings.len().saturating_sub(1));
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn request_quit(&mut self) {
        self.state = AppState::ConfirmingQuit;
    }
}

/// Format the time between `then` and `now` as "5m ago", "2h ago", ...
pub fn age_display(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a token character should be accepted
pub fn can_add_token_char(current_len: usize, c: char) -> bool {
    current_len < MAX_TOKEN_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

/// Check if a form character should be accepted into a field capped at `max_len`
pub fn can_add_field_char(current_len: usize, max_len: usize, c: char) -> bool {
    current_len < max_len && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
