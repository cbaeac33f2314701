//! Application state and the view-state machine.
//!
//! ```text
//!   login ⇄ register ──auth ok──▶ dashboard ──pdf──▶ analyzing ──hit──▶ summary
//!     ▲                              ▲  │                │                 │
//!     │                              │  └──history──────────────────────▶ │
//!     │                              └────────miss───────┘                 │
//!     │                              ◀───────────────reset─────────────────┘
//!     └──────────────── sign out (any authenticated view) ─────────────────
//! ```
//!
//! All mutation goes through [`Controller`] methods. Async work (auth calls,
//! the analysis delay) is started with a [`Ticket`]; completions that arrive
//! after the ticket was cancelled or superseded are rejected with
//! [`Error::StaleTicket`] and change nothing.

use log::{debug, info, warn};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::auth::{
    AuthError, AuthResponse, LoginPayload, PASSWORD_MISMATCH_MESSAGE, RegisterPayload,
    UNREACHABLE_MESSAGE,
};
use crate::classifier::Classifier;
use crate::clipboard::{COPY_FAILED_MESSAGE, COPY_OK_MESSAGE, Clipboard};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::history::{History, HistoryEntry};
use crate::notice::{NoticeKind, NoticeRecord, TemplateKind};
use crate::password::{self, Strength};
use crate::pipeline::AppEvent;
use crate::session::{Session, User};
use crate::toast::{Toast, ToastMessage};
use crate::upload::UploadedFile;

/// Shown when a non-PDF file is submitted.
pub const NOT_PDF_MESSAGE: &str = "Please upload a PDF file.";

const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// The five mutually exclusive screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Dashboard,
    Analyzing,
    Summary,
}

impl View {
    /// Views that require a signed-in user.
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Dashboard | Self::Analyzing | Self::Summary)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Analyzing => "analyzing",
            Self::Summary => "summary",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Login,
    Register,
    Analysis,
}

/// Handle for one in-flight async operation.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: u64,
    pub kind: OperationKind,
    token: CancellationToken,
}

impl Ticket {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// What a finished analysis produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Identified { entry_id: u64, kind: NoticeKind },
    Unidentified,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything the UI renders from. Read-only outside the controller.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub session: Session,
    pub login_form: LoginPayload,
    pub register_form: RegisterPayload,
    /// Inline error under the login/register form.
    pub form_error: Option<String>,
    pub active_notice: Option<&'static NoticeRecord>,
    pub active_file: Option<UploadedFile>,
    pub history: History,
    pub toast: Toast,
}

impl AppState {
    fn new(config: &ClientConfig) -> Self {
        Self {
            view: View::default(),
            session: Session::default(),
            login_form: LoginPayload::default(),
            register_form: RegisterPayload::default(),
            form_error: None,
            active_notice: None,
            active_file: None,
            history: History::new(config.history_limit),
            toast: Toast::new(config.toast_duration),
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct Controller {
    state: AppState,
    classifier: Classifier,
    config: ClientConfig,
    next_ticket: u64,
    pending: Option<Ticket>,
}

impl Controller {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_classifier(config, Classifier::auto())
    }

    pub fn with_classifier(config: ClientConfig, classifier: Classifier) -> Self {
        Self {
            state: AppState::new(&config),
            classifier,
            config,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Start already signed in, on the dashboard. Used by headless runs.
    pub fn signed_in(config: ClientConfig, user: User) -> Self {
        let mut controller = Self::new(config);
        controller.state.session.sign_in(user);
        controller.state.view = View::Dashboard;
        controller
    }

    // -- accessors ----------------------------------------------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn user(&self) -> Option<&User> {
        self.state.session.user()
    }

    /// The in-flight operation, if any.
    pub fn pending(&self) -> Option<&Ticket> {
        self.pending.as_ref()
    }

    /// True while a login or registration request is outstanding.
    pub fn auth_pending(&self) -> bool {
        matches!(
            self.pending.as_ref().map(|t| t.kind),
            Some(OperationKind::Login | OperationKind::Register)
        )
    }

    /// Visible transient message right now.
    pub fn toast(&self) -> Option<&ToastMessage> {
        self.state.toast.visible(Instant::now())
    }

    /// Advisory strength of the registration password.
    pub fn password_strength(&self) -> Strength {
        password::evaluate(&self.state.register_form.password)
    }

    /// Form fields are plain input, editing them is not a transition.
    pub fn login_form_mut(&mut self) -> &mut LoginPayload {
        &mut self.state.login_form
    }

    pub fn register_form_mut(&mut self) -> &mut RegisterPayload {
        &mut self.state.register_form
    }

    /// Expire the transient message once its time is up.
    pub fn tick(&mut self) {
        self.state.toast.expire(Instant::now());
    }

    /// Error toast raised by the front end itself (bad path, no terminal).
    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.state.toast.error(text, Instant::now());
    }

    // -- authentication -----------------------------------------------------

    /// Toggle between the login and register forms. Clears the form error;
    /// clears entered values only when `clear_fields` is set.
    pub fn switch_auth_view(&mut self, clear_fields: bool) -> Result<View> {
        let next = match self.state.view {
            View::Login => View::Register,
            View::Register => View::Login,
            from => {
                return Err(Error::InvalidTransition {
                    from,
                    action: "switch auth form",
                });
            }
        };
        self.cancel_pending();
        self.state.form_error = None;
        if clear_fields {
            self.state.login_form = LoginPayload::default();
            self.state.register_form = RegisterPayload::default();
        }
        self.state.view = next;
        Ok(next)
    }

    /// Start a login request for the current form contents.
    pub fn begin_login(&mut self) -> Result<(Ticket, LoginPayload)> {
        self.require(&[View::Login], "log in")?;
        self.state.form_error = None;
        let ticket = self.issue(OperationKind::Login);
        Ok((ticket, self.state.login_form.clone()))
    }

    /// Start a registration request. A password mismatch sets the form error
    /// and no ticket is issued, so no request can be sent.
    pub fn begin_register(&mut self) -> Result<(Ticket, RegisterPayload)> {
        self.require(&[View::Register], "register")?;
        if !self.state.register_form.passwords_match() {
            self.state.form_error = Some(PASSWORD_MISMATCH_MESSAGE.to_string());
            return Err(Error::PasswordMismatch);
        }
        self.state.form_error = None;
        let ticket = self.issue(OperationKind::Register);
        Ok((ticket, self.state.register_form.clone()))
    }

    /// Apply the endpoint's answer for `ticket_id`.
    pub fn complete_auth(
        &mut self,
        ticket_id: u64,
        result: std::result::Result<AuthResponse, AuthError>,
    ) -> Result<()> {
        let kind = match self.pending.as_ref().map(|t| (t.id, t.kind)) {
            Some((id, kind @ (OperationKind::Login | OperationKind::Register)))
                if id == ticket_id =>
            {
                kind
            }
            _ => return Err(self.stale(ticket_id)),
        };
        self.pending = None;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("{kind:?} request failed: {e}");
                self.state.form_error = Some(UNREACHABLE_MESSAGE.to_string());
                return Ok(());
            }
        };

        if !response.success {
            let fallback = match kind {
                OperationKind::Register => REGISTER_FAILED_MESSAGE,
                _ => LOGIN_FAILED_MESSAGE,
            };
            self.state.form_error = Some(response.message.unwrap_or_else(|| fallback.to_string()));
            return Ok(());
        }

        let from_form = match kind {
            OperationKind::Register => User::from_registration(&self.state.register_form),
            _ => User::from_login(&self.state.login_form.email),
        };
        let user = match response.user {
            Some(remote) => User::from_remote(remote, &from_form),
            None => from_form,
        };
        info!("signed in as {}", user.email);

        let greeting = match kind {
            OperationKind::Register => "Registration successful!",
            _ => "Login successful!",
        };
        self.state.session.sign_in(user);
        self.state.form_error = None;
        self.state.view = View::Dashboard;
        self.state.toast.success(greeting, Instant::now());
        Ok(())
    }

    /// Leave any authenticated view for the login form, dropping the session
    /// and its history.
    pub fn sign_out(&mut self) -> Result<()> {
        if !self.state.view.is_authenticated() {
            return Err(Error::InvalidTransition {
                from: self.state.view,
                action: "sign out",
            });
        }
        self.cancel_pending();
        if let Some(user) = self.state.session.sign_out() {
            info!("signed out {}", user.email);
        }
        self.state.active_notice = None;
        self.state.active_file = None;
        self.state.form_error = None;
        self.state.history.clear();
        self.state.view = View::Login;
        Ok(())
    }

    // -- analysis -----------------------------------------------------------

    /// Submit a file for analysis. Non-PDF files raise an error toast and
    /// leave the view alone.
    pub fn submit_file(&mut self, file: UploadedFile) -> Result<Ticket> {
        self.require(&[View::Dashboard], "upload a file")?;
        if !file.is_pdf() {
            debug!("rejected {} ({})", file.name, file.mime_type);
            self.state.toast.error(NOT_PDF_MESSAGE, Instant::now());
            return Err(Error::NotPdf {
                mime_type: file.mime_type,
            });
        }
        info!("analyzing {}", file.name);
        self.state.active_notice = None;
        self.state.active_file = Some(file);
        self.state.view = View::Analyzing;
        Ok(self.issue(OperationKind::Analysis))
    }

    /// Classify the submitted file once the analysis delay has elapsed.
    pub fn complete_analysis(&mut self, ticket_id: u64) -> Result<AnalysisOutcome> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|t| t.id == ticket_id && t.kind == OperationKind::Analysis);
        if !current || self.state.view != View::Analyzing {
            return Err(self.stale(ticket_id));
        }
        self.pending = None;

        let Some(file) = self.state.active_file.clone() else {
            self.state.view = View::Dashboard;
            return Ok(AnalysisOutcome::Unidentified);
        };
        let now = Instant::now();

        match self.classifier.classify(&file.name) {
            Some(record) => {
                let entry_id = self.state.history.push(record, file).id;
                self.state.active_notice = Some(record);
                self.state.view = View::Summary;
                self.state
                    .toast
                    .success(format!("{} notice analyzed.", record.kind), now);
                info!("identified {} (history entry {entry_id})", record.kind);
                Ok(AnalysisOutcome::Identified {
                    entry_id,
                    kind: record.kind,
                })
            }
            None => {
                info!("no notice type matched {}", file.name);
                self.state.active_file = None;
                self.state.view = View::Dashboard;
                self.state.toast.error(self.classifier.miss_message(), now);
                Ok(AnalysisOutcome::Unidentified)
            }
        }
    }

    /// Re-open a past analysis. Synchronous, no delay.
    pub fn select_history(&mut self, id: u64) -> Result<()> {
        self.require(&[View::Dashboard], "open history")?;
        let HistoryEntry { record, file, .. } = self
            .state
            .history
            .get(id)
            .cloned()
            .ok_or(Error::UnknownHistoryEntry(id))?;
        self.state.active_notice = Some(record);
        self.state.active_file = Some(file);
        self.state.view = View::Summary;
        Ok(())
    }

    /// Back from the summary to the dashboard.
    pub fn reset(&mut self) -> Result<()> {
        self.require(&[View::Summary], "reset")?;
        self.cancel_pending();
        self.state.active_notice = None;
        self.state.active_file = None;
        self.state.view = View::Dashboard;
        Ok(())
    }

    /// Copy one of the active notice's templates. Failure is reported with a
    /// toast and returned, it never changes the view.
    pub fn copy_template(
        &mut self,
        kind: TemplateKind,
        clipboard: &mut dyn Clipboard,
    ) -> Result<()> {
        self.require(&[View::Summary], "copy a template")?;
        let record = self.state.active_notice.ok_or(Error::NoActiveNotice)?;
        let now = Instant::now();
        match clipboard.write_text(record.template(kind)) {
            Ok(()) => {
                debug!("copied {} for {}", kind.label(), record.kind);
                self.state.toast.success(COPY_OK_MESSAGE, now);
                Ok(())
            }
            Err(e) => {
                warn!("copying {} failed: {e}", kind.label());
                self.state.toast.error(COPY_FAILED_MESSAGE, now);
                Err(e.into())
            }
        }
    }

    // -- events -------------------------------------------------------------

    /// Apply a completion produced by the pipeline.
    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::AuthFinished { ticket, result } => self.complete_auth(ticket, result),
            AppEvent::AnalysisReady { ticket } => self.complete_analysis(ticket).map(|_| ()),
        }
    }

    // -- internals ----------------------------------------------------------

    fn require(&self, allowed: &[View], action: &'static str) -> Result<()> {
        if allowed.contains(&self.state.view) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.state.view,
                action,
            })
        }
    }

    /// Issue a new ticket, cancelling whatever was in flight.
    fn issue(&mut self, kind: OperationKind) -> Ticket {
        self.cancel_pending();
        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            kind,
            token: CancellationToken::new(),
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!("cancelled ticket {} ({:?})", ticket.id, ticket.kind);
            ticket.token.cancel();
        }
    }

    fn stale(&self, ticket_id: u64) -> Error {
        debug!("discarding completion for stale ticket {ticket_id}");
        Error::StaleTicket(ticket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RemoteUser;
    use crate::clipboard::{ClipboardError, MemoryClipboard};
    use crate::notices::{cp23, cp503c};

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile::new(name, "application/pdf")
    }

    fn dashboard() -> Controller {
        Controller::signed_in(ClientConfig::default(), User::from_login("ada@example.com"))
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> std::result::Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }
    }

    // -----------------------------------------------------------------------
    // Login / register
    // -----------------------------------------------------------------------

    #[test]
    fn test_initial_view_is_login() {
        let c = Controller::new(ClientConfig::default());
        assert_eq!(c.view(), View::Login);
        assert!(c.user().is_none());
        assert!(c.pending().is_none());
    }

    #[test]
    fn test_switch_keeps_fields_and_clears_error() {
        let mut c = Controller::new(ClientConfig::default());
        c.login_form_mut().email = "ada@example.com".into();
        c.state.form_error = Some("old".into());

        assert_eq!(c.switch_auth_view(false).unwrap(), View::Register);
        assert!(c.state().form_error.is_none());
        assert_eq!(c.state().login_form.email, "ada@example.com");

        assert_eq!(c.switch_auth_view(false).unwrap(), View::Login);
    }

    #[test]
    fn test_switch_with_clear_fields() {
        let mut c = Controller::new(ClientConfig::default());
        c.login_form_mut().email = "ada@example.com".into();
        c.switch_auth_view(true).unwrap();
        assert!(c.state().login_form.email.is_empty());
    }

    #[test]
    fn test_switch_not_allowed_when_signed_in() {
        let mut c = dashboard();
        assert!(matches!(
            c.switch_auth_view(false),
            Err(Error::InvalidTransition { from: View::Dashboard, .. })
        ));
    }

    #[test]
    fn test_register_password_mismatch_issues_no_ticket() {
        let mut c = Controller::new(ClientConfig::default());
        c.switch_auth_view(false).unwrap();
        c.register_form_mut().password = "Secret1!".into();
        c.register_form_mut().confirm_password = "Secret2!".into();

        assert!(matches!(c.begin_register(), Err(Error::PasswordMismatch)));
        assert_eq!(c.state().form_error.as_deref(), Some("Passwords do not match."));
        assert!(c.pending().is_none());
        assert_eq!(c.view(), View::Register);
    }

    #[test]
    fn test_login_success_moves_to_dashboard() {
        let mut c = Controller::new(ClientConfig::default());
        c.login_form_mut().email = "ada@example.com".into();
        let (ticket, payload) = c.begin_login().unwrap();
        assert_eq!(payload.email, "ada@example.com");
        assert!(c.auth_pending());

        c.complete_auth(ticket.id, Ok(AuthResponse::ok(None))).unwrap();
        assert_eq!(c.view(), View::Dashboard);
        assert_eq!(c.user().unwrap().email, "ada@example.com");
        assert_eq!(c.toast().unwrap().text, "Login successful!");
        assert!(!c.auth_pending());
    }

    #[test]
    fn test_register_success_uses_remote_user() {
        let mut c = Controller::new(ClientConfig::default());
        c.switch_auth_view(false).unwrap();
        {
            let form = c.register_form_mut();
            form.first_name = "Ada".into();
            form.email = "ada@example.com".into();
            form.password = "Secret1!".into();
            form.confirm_password = "Secret1!".into();
        }
        let (ticket, _) = c.begin_register().unwrap();
        let remote = RemoteUser {
            id: Some(serde_json::json!("srv-1")),
            ..Default::default()
        };
        c.complete_auth(ticket.id, Ok(AuthResponse::ok(Some(remote))))
            .unwrap();

        let user = c.user().unwrap();
        assert_eq!(user.id, "srv-1");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(c.view(), View::Dashboard);
    }

    #[test]
    fn test_login_rejected_keeps_view() {
        let mut c = Controller::new(ClientConfig::default());
        let (ticket, _) = c.begin_login().unwrap();
        c.complete_auth(ticket.id, Ok(AuthResponse::rejected("Invalid credentials")))
            .unwrap();
        assert_eq!(c.view(), View::Login);
        assert_eq!(c.state().form_error.as_deref(), Some("Invalid credentials"));
        assert!(c.user().is_none());
    }

    #[test]
    fn test_login_rejected_without_message() {
        let mut c = Controller::new(ClientConfig::default());
        let (ticket, _) = c.begin_login().unwrap();
        c.complete_auth(ticket.id, Ok(AuthResponse::default())).unwrap();
        assert_eq!(c.state().form_error.as_deref(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[test]
    fn test_login_transport_failure() {
        let mut c = Controller::new(ClientConfig::default());
        let (ticket, _) = c.begin_login().unwrap();
        c.complete_auth(ticket.id, Err(AuthError::Cancelled)).unwrap();
        assert_eq!(c.view(), View::Login);
        assert_eq!(c.state().form_error.as_deref(), Some(UNREACHABLE_MESSAGE));
    }

    #[test]
    fn test_auth_completion_after_switch_is_stale() {
        let mut c = Controller::new(ClientConfig::default());
        let (ticket, _) = c.begin_login().unwrap();
        c.switch_auth_view(false).unwrap();
        assert!(ticket.is_cancelled());

        let err = c.complete_auth(ticket.id, Ok(AuthResponse::ok(None))).unwrap_err();
        assert!(matches!(err, Error::StaleTicket(id) if id == ticket.id));
        assert_eq!(c.view(), View::Register);
        assert!(c.user().is_none());
    }

    #[test]
    fn test_second_login_supersedes_first() {
        let mut c = Controller::new(ClientConfig::default());
        let (first, _) = c.begin_login().unwrap();
        let (second, _) = c.begin_login().unwrap();
        assert!(first.is_cancelled());
        assert!(c.complete_auth(first.id, Ok(AuthResponse::ok(None))).is_err());
        c.complete_auth(second.id, Ok(AuthResponse::ok(None))).unwrap();
        assert_eq!(c.view(), View::Dashboard);
    }

    // -----------------------------------------------------------------------
    // Upload / analysis
    // -----------------------------------------------------------------------

    #[test]
    fn test_non_pdf_rejected_without_transition() {
        let mut c = dashboard();
        let err = c
            .submit_file(UploadedFile::new("CP23.png", "image/png"))
            .unwrap_err();
        assert!(matches!(err, Error::NotPdf { .. }));
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.pending().is_none());
        assert_eq!(c.toast().unwrap().text, NOT_PDF_MESSAGE);
    }

    #[test]
    fn test_upload_requires_dashboard() {
        let mut c = Controller::new(ClientConfig::default());
        assert!(matches!(
            c.submit_file(pdf("cp23.pdf")),
            Err(Error::InvalidTransition { from: View::Login, .. })
        ));
    }

    #[test]
    fn test_no_reentrant_upload_while_analyzing() {
        let mut c = dashboard();
        c.submit_file(pdf("cp23.pdf")).unwrap();
        assert!(c.submit_file(pdf("cp503c.pdf")).is_err());
        assert_eq!(c.state().active_file.as_ref().unwrap().name, "cp23.pdf");
    }

    #[test]
    fn test_cp23_flow() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("CP23_notice_2024.pdf")).unwrap();
        assert_eq!(c.view(), View::Analyzing);

        let outcome = c.complete_analysis(ticket.id).unwrap();
        assert!(matches!(
            outcome,
            AnalysisOutcome::Identified { kind: NoticeKind::Cp23, .. }
        ));
        assert_eq!(c.view(), View::Summary);
        let record = c.state().active_notice.unwrap();
        assert_eq!(record, &cp23::RECORD);
        assert_eq!(record.amount_due(), "$328.45");
        assert_eq!(record.due_date, "March 15, 2024");
        assert_eq!(c.state().history.len(), 1);
    }

    #[test]
    fn test_cp503c_flow() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("Second_Reminder_CP503.pdf")).unwrap();
        c.complete_analysis(ticket.id).unwrap();
        assert_eq!(c.state().active_notice.unwrap(), &cp503c::RECORD);
    }

    #[test]
    fn test_unidentified_returns_to_dashboard() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("random_document.pdf")).unwrap();
        let outcome = c.complete_analysis(ticket.id).unwrap();

        assert_eq!(outcome, AnalysisOutcome::Unidentified);
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.state().history.is_empty());
        assert!(c.state().active_file.is_none());
        assert_eq!(
            c.toast().unwrap().text,
            "Could not identify notice type (CP23 or CP503C) from filename."
        );
    }

    #[test]
    fn test_analysis_after_sign_out_is_discarded() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        c.sign_out().unwrap();
        assert!(ticket.is_cancelled());

        assert!(matches!(
            c.complete_analysis(ticket.id),
            Err(Error::StaleTicket(_))
        ));
        assert_eq!(c.view(), View::Login);
        assert!(c.state().history.is_empty());
    }

    #[test]
    fn test_history_select_is_synchronous() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        let AnalysisOutcome::Identified { entry_id, .. } = c.complete_analysis(ticket.id).unwrap()
        else {
            panic!("expected a match");
        };
        c.reset().unwrap();
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.state().active_notice.is_none());
        assert!(c.state().active_file.is_none());

        c.select_history(entry_id).unwrap();
        assert_eq!(c.view(), View::Summary);
        assert_eq!(c.state().active_notice.unwrap().kind, NoticeKind::Cp23);
        assert!(c.pending().is_none());
        assert_eq!(c.state().history.len(), 1);
    }

    #[test]
    fn test_select_unknown_history() {
        let mut c = dashboard();
        assert!(matches!(
            c.select_history(12345),
            Err(Error::UnknownHistoryEntry(12345))
        ));
        assert_eq!(c.view(), View::Dashboard);
    }

    #[test]
    fn test_history_capped() {
        let mut c = dashboard();
        for i in 0..12 {
            let ticket = c.submit_file(pdf(&format!("cp23_{i}.pdf"))).unwrap();
            c.complete_analysis(ticket.id).unwrap();
            c.reset().unwrap();
        }
        assert_eq!(c.state().history.len(), 10);
        assert_eq!(c.state().history.latest().unwrap().file.name, "cp23_11.pdf");
    }

    // -----------------------------------------------------------------------
    // Sign out / reset / clipboard
    // -----------------------------------------------------------------------

    #[test]
    fn test_sign_out_from_summary() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        c.complete_analysis(ticket.id).unwrap();
        assert_eq!(c.state().history.len(), 1);
        c.sign_out().unwrap();
        assert_eq!(c.view(), View::Login);
        assert!(c.user().is_none());
        assert!(c.state().active_notice.is_none());
        assert!(c.state().history.is_empty());
    }

    #[test]
    fn test_sign_out_requires_session_view() {
        let mut c = Controller::new(ClientConfig::default());
        assert!(c.sign_out().is_err());
    }

    #[test]
    fn test_reset_only_from_summary() {
        let mut c = dashboard();
        assert!(c.reset().is_err());
    }

    #[test]
    fn test_copy_template_success() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        c.complete_analysis(ticket.id).unwrap();

        let mut clip = MemoryClipboard::default();
        c.copy_template(TemplateKind::IrsResponse, &mut clip).unwrap();
        assert_eq!(clip.contents(), Some(cp23::RECORD.templates.irs_response));
        assert_eq!(c.toast().unwrap().text, COPY_OK_MESSAGE);
    }

    #[test]
    fn test_copy_template_failure_is_non_fatal() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        c.complete_analysis(ticket.id).unwrap();

        let err = c
            .copy_template(TemplateKind::TaxpayerEmail, &mut BrokenClipboard)
            .unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
        assert_eq!(c.view(), View::Summary);
        assert_eq!(c.toast().unwrap().text, COPY_FAILED_MESSAGE);
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut c = dashboard();
        let ticket = c.submit_file(pdf("cp23.pdf")).unwrap();
        c.handle_event(AppEvent::AnalysisReady { ticket: ticket.id })
            .unwrap();
        assert_eq!(c.view(), View::Summary);
    }
}
