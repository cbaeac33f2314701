//! TUI application state and event loop.
//!
//! Design: the [`Controller`] owns everything the user sees. This struct only
//! adds what a terminal needs on top of it (focused field, typed path, list
//! cursor, summary tab). Auth calls and the analysis delay run as tokio tasks
//! and report back over a channel that the loop drains every frame.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::prelude::*;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use noticelens_core::pipeline::{self, AppEvent};
use noticelens_core::{
    AuthGateway, ClientConfig, Clipboard, Controller, HistoryEntry, TemplateKind, UploadedFile,
    View,
};

use super::input::{self, FormField, LOGIN_FIELDS, REGISTER_FIELDS};

// ---------------------------------------------------------------------------
// SummaryTab
// ---------------------------------------------------------------------------

/// Section of the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryTab {
    #[default]
    Overview,
    Why,
    Breakdown,
    Fix,
    Payment,
    Help,
    Templates,
}

impl SummaryTab {
    pub const ALL: [SummaryTab; 7] = [
        Self::Overview,
        Self::Why,
        Self::Breakdown,
        Self::Fix,
        Self::Payment,
        Self::Help,
        Self::Templates,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[input::cycle(self.index(), Self::ALL.len(), true)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[input::cycle(self.index(), Self::ALL.len(), false)]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Summary",
            Self::Why => "Why",
            Self::Breakdown => "Breakdown",
            Self::Fix => "What to do",
            Self::Payment => "Pay",
            Self::Help => "Help",
            Self::Templates => "Letters",
        }
    }
}

/// Which dashboard panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    Path,
    History,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    controller: Controller,
    gateway: Arc<dyn AuthGateway>,
    clipboard: Box<dyn Clipboard>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    running: bool,
    field: usize,
    path_input: String,
    focus: DashboardFocus,
    history_cursor: usize,
    tab: SummaryTab,
    scroll: u16,
    why_expanded: bool,
    frame: usize,
}

impl App {
    pub fn new(
        config: ClientConfig,
        gateway: Arc<dyn AuthGateway>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self::with_controller(Controller::new(config), gateway, clipboard)
    }

    pub fn with_controller(
        controller: Controller,
        gateway: Arc<dyn AuthGateway>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            controller,
            gateway,
            clipboard,
            events_tx,
            events_rx,
            running: true,
            field: 0,
            path_input: String::new(),
            focus: DashboardFocus::default(),
            history_cursor: 0,
            tab: SummaryTab::default(),
            scroll: 0,
            why_expanded: false,
            frame: 0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }

            self.drain_events();
            self.controller.tick();
            self.frame = self.frame.wrapping_add(1);
        }

        Ok(())
    }

    /// Apply every completion that has arrived since the last frame.
    pub(crate) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let before = self.controller.view();
            match self.controller.handle_event(event) {
                Ok(()) if before != View::Summary && self.controller.view() == View::Summary => {
                    self.open_summary();
                }
                Ok(()) => {}
                Err(e) => debug!("dropped event: {e}"),
            }
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match self.controller.view() {
            View::Login | View::Register => self.handle_auth_key(key.code),
            View::Dashboard => self.handle_dashboard_key(key.code),
            View::Analyzing => {
                if key.code == KeyCode::F(9) {
                    self.sign_out();
                }
            }
            View::Summary => self.handle_summary_key(key.code),
        }
    }

    // -- login / register ---------------------------------------------------

    pub fn fields(&self) -> &'static [FormField] {
        match self.controller.view() {
            View::Register => REGISTER_FIELDS,
            _ => LOGIN_FIELDS,
        }
    }

    fn handle_auth_key(&mut self, key: KeyCode) {
        let len = self.fields().len();
        match key {
            KeyCode::Esc => self.running = false,
            KeyCode::F(2) | KeyCode::F(3) => {
                if self.controller.switch_auth_view(key == KeyCode::F(3)).is_ok() {
                    self.field = 0;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.field = input::cycle(self.field, len, true),
            KeyCode::BackTab | KeyCode::Up => self.field = input::cycle(self.field, len, false),
            KeyCode::Enter => self.submit_auth(),
            other => {
                let field = self.fields()[self.field.min(len - 1)];
                match self.controller.view() {
                    View::Register => {
                        let form = self.controller.register_form_mut();
                        input::edit(field.register_value_mut(form), other);
                    }
                    _ => {
                        let form = self.controller.login_form_mut();
                        if let Some(value) = field.login_value_mut(form) {
                            input::edit(value, other);
                        }
                    }
                }
            }
        }
    }

    fn submit_auth(&mut self) {
        if self.controller.auth_pending() {
            return;
        }
        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        let started = match self.controller.view() {
            View::Login => pipeline::start_login(&mut self.controller, gateway, events),
            // A mismatch leaves its message on the form.
            View::Register => pipeline::start_register(&mut self.controller, gateway, events),
            _ => return,
        };
        if let Err(e) = started {
            debug!("auth not sent: {e}");
        }
    }

    // -- dashboard ----------------------------------------------------------

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.running = false,
            KeyCode::F(9) => self.sign_out(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    DashboardFocus::Path if !self.controller.state().history.is_empty() => {
                        DashboardFocus::History
                    }
                    _ => DashboardFocus::Path,
                };
            }
            _ => match self.focus {
                DashboardFocus::Path => match key {
                    KeyCode::Enter => self.submit_path(),
                    other => {
                        input::edit(&mut self.path_input, other);
                    }
                },
                DashboardFocus::History => self.handle_history_key(key),
            },
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        let len = self.controller.state().history.len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.history_cursor = self.history_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.history_cursor + 1 < len {
                    self.history_cursor += 1;
                }
            }
            KeyCode::Enter => {
                let id = self.history_entries().get(self.history_cursor).map(|e| e.id);
                if let Some(id) = id
                    && self.controller.select_history(id).is_ok()
                {
                    self.open_summary();
                }
            }
            _ => {}
        }
    }

    fn submit_path(&mut self) {
        let raw = self.path_input.trim();
        if raw.is_empty() {
            return;
        }
        let path = PathBuf::from(raw);
        let file = match UploadedFile::from_path(&path) {
            Ok(file) => file,
            Err(e) => {
                self.controller
                    .notify_error(format!("Cannot open {}: {e}", path.display()));
                return;
            }
        };
        // Non-PDF files raise their own toast and keep the typed path.
        if let Ok(ticket) = self.controller.submit_file(file) {
            let delay = self.controller.config().analysis_delay;
            pipeline::spawn_analysis(ticket, delay, self.events_tx.clone());
            self.path_input.clear();
        }
    }

    // -- summary ------------------------------------------------------------

    fn handle_summary_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('b') => {
                if self.controller.reset().is_ok() {
                    self.focus = DashboardFocus::Path;
                }
            }
            KeyCode::F(9) => self.sign_out(),
            KeyCode::Right | KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::Left | KeyCode::BackTab => self.set_tab(self.tab.prev()),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.set_tab(SummaryTab::ALL[index]);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Enter if self.tab == SummaryTab::Why => {
                self.why_expanded = !self.why_expanded;
            }
            KeyCode::Char('e') => self.copy(TemplateKind::TaxpayerEmail),
            KeyCode::Char('l') => self.copy(TemplateKind::IrsResponse),
            _ => {}
        }
    }

    fn set_tab(&mut self, tab: SummaryTab) {
        self.tab = tab;
        self.scroll = 0;
    }

    fn open_summary(&mut self) {
        self.tab = SummaryTab::Overview;
        self.scroll = 0;
        self.why_expanded = false;
    }

    fn copy(&mut self, kind: TemplateKind) {
        // Failure shows a toast; nothing else to do here.
        let _ = self.controller.copy_template(kind, self.clipboard.as_mut());
    }

    fn sign_out(&mut self) {
        if self.controller.sign_out().is_ok() {
            self.field = 0;
            self.path_input.clear();
            self.focus = DashboardFocus::Path;
            self.history_cursor = 0;
        }
    }

    // -- accessors for the renderer -----------------------------------------

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn focus(&self) -> DashboardFocus {
        self.focus
    }

    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    pub fn history_entries(&self) -> Vec<&HistoryEntry> {
        self.controller.state().history.iter().collect()
    }

    pub fn tab(&self) -> SummaryTab {
        self.tab
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn why_expanded(&self) -> bool {
        self.why_expanded
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crossterm::event::KeyEventState;
    use noticelens_core::{
        AuthError, AuthResponse, LoginPayload, MemoryClipboard, NoticeKind, PDF_MIME,
        RegisterPayload, User,
    };

    struct AcceptAll;

    #[async_trait::async_trait]
    impl AuthGateway for AcceptAll {
        async fn register(&self, _p: &RegisterPayload) -> Result<AuthResponse, AuthError> {
            Ok(AuthResponse::ok(None))
        }

        async fn login(&self, _p: &LoginPayload) -> Result<AuthResponse, AuthError> {
            Ok(AuthResponse::ok(None))
        }
    }

    #[derive(Default)]
    struct CountingGateway {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl AuthGateway for CountingGateway {
        async fn register(&self, _p: &RegisterPayload) -> Result<AuthResponse, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AuthResponse::ok(None))
        }

        async fn login(&self, _p: &LoginPayload) -> Result<AuthResponse, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AuthResponse::ok(None))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        App::new(
            ClientConfig::default(),
            Arc::new(AcceptAll),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn dashboard_app() -> App {
        App::with_controller(
            Controller::signed_in(ClientConfig::default(), User::from_login("ada@example.com")),
            Arc::new(AcceptAll),
            Box::new(MemoryClipboard::default()),
        )
    }

    // -----------------------------------------------------------------------
    // SummaryTab
    // -----------------------------------------------------------------------

    #[test]
    fn summary_tab_cycles_through_all_variants() {
        let mut tab = SummaryTab::default();
        for expected in SummaryTab::ALL.iter().skip(1) {
            tab = tab.next();
            assert_eq!(tab, *expected);
        }
        assert_eq!(tab.next(), SummaryTab::Overview);
        assert_eq!(SummaryTab::Overview.prev(), SummaryTab::Templates);
    }

    #[test]
    fn summary_tab_labels_unique() {
        let mut labels: Vec<_> = SummaryTab::ALL.iter().map(|t| t.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), SummaryTab::ALL.len());
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    #[test]
    fn typing_fills_focused_login_field() {
        let mut app = app();
        type_text(&mut app, "ada@example.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "hunter22");
        app.handle_key(key(KeyCode::Backspace));

        let form = &app.controller().state().login_form;
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.password, "hunter2");
    }

    #[test]
    fn f2_switches_forms_and_resets_focus() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(app.controller().view(), View::Register);
        assert_eq!(app.field(), 0);
        assert_eq!(app.fields().len(), 8);

        type_text(&mut app, "Ada");
        assert_eq!(app.controller().state().register_form.first_name, "Ada");
    }

    #[test]
    fn register_mismatch_stays_on_form() {
        let mut app = app();
        app.handle_key(key(KeyCode::F(2)));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut app, "Secret1!");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Secret2!");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.controller().view(), View::Register);
        assert_eq!(
            app.controller().state().form_error.as_deref(),
            Some("Passwords do not match.")
        );
        assert!(app.controller().pending().is_none());
    }

    #[tokio::test]
    async fn register_sends_only_when_passwords_match() {
        let gateway = Arc::new(CountingGateway::default());
        let mut app = App::new(
            ClientConfig::default(),
            gateway.clone(),
            Box::new(MemoryClipboard::default()),
        );
        app.handle_key(key(KeyCode::F(2)));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut app, "Secret1!");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Secret2!");
        app.handle_key(key(KeyCode::Enter));

        tokio::task::yield_now().await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert!(app.events_rx.try_recv().is_err());

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "1!");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.controller().auth_pending());

        let event = app.events_rx.recv().await.unwrap();
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        app.controller.handle_event(event).unwrap();
        assert_eq!(app.controller().view(), View::Dashboard);
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut app = dashboard_app();
        app.handle_key(KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        });
        assert!(!app.is_running());
    }

    #[test]
    fn dashboard_letters_go_to_path() {
        let mut app = dashboard_app();
        type_text(&mut app, "bel");
        assert_eq!(app.path_input(), "bel");
        assert_eq!(app.controller().view(), View::Dashboard);
    }

    #[test]
    fn missing_path_shows_error_toast() {
        let mut app = dashboard_app();
        type_text(&mut app, "/no/such/cp23.pdf");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller().view(), View::Dashboard);
        assert!(
            app.controller()
                .toast()
                .unwrap()
                .text
                .starts_with("Cannot open /no/such/cp23.pdf")
        );
    }

    #[tokio::test]
    async fn login_completes_through_event_channel() {
        let mut app = app();
        type_text(&mut app, "ada@example.com");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.controller().auth_pending());

        let event = app.events_rx.recv().await.unwrap();
        app.controller.handle_event(event).unwrap();
        assert_eq!(app.controller().view(), View::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn upload_history_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CP23_notice_2024.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let mut app = dashboard_app();
        type_text(&mut app, &path.display().to_string());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller().view(), View::Analyzing);
        assert!(app.path_input().is_empty());

        tokio::time::sleep(Duration::from_millis(2001)).await;
        app.drain_events();
        assert_eq!(app.controller().view(), View::Summary);
        assert_eq!(app.tab(), SummaryTab::Overview);

        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(
            app.controller().toast().unwrap().text,
            "Copied to clipboard!"
        );

        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.tab(), SummaryTab::Breakdown);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.controller().view(), View::Dashboard);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), DashboardFocus::History);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller().view(), View::Summary);
        assert_eq!(
            app.controller().state().active_notice.unwrap().kind,
            NoticeKind::Cp23
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_event_keeps_summary_tab() {
        let mut app = dashboard_app();
        let ticket = app
            .controller
            .submit_file(UploadedFile::new("cp503c.pdf", PDF_MIME))
            .unwrap();
        pipeline::spawn_analysis(ticket, Duration::ZERO, app.events_tx.clone());
        tokio::time::sleep(Duration::from_millis(1)).await;
        app.drain_events();
        assert_eq!(app.controller().view(), View::Summary);
        assert_eq!(app.tab(), SummaryTab::Overview);

        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.tab(), SummaryTab::Breakdown);

        app.events_tx
            .send(AppEvent::AnalysisReady { ticket: 999 })
            .unwrap();
        app.events_tx
            .send(AppEvent::AuthFinished {
                ticket: 998,
                result: Ok(AuthResponse::ok(None)),
            })
            .unwrap();
        app.drain_events();
        assert_eq!(app.controller().view(), View::Summary);
        assert_eq!(app.tab(), SummaryTab::Breakdown);
    }

    #[test]
    fn tab_without_history_keeps_path_focus() {
        let mut app = dashboard_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), DashboardFocus::Path);
    }

    #[test]
    fn f9_signs_out_from_dashboard() {
        let mut app = dashboard_app();
        type_text(&mut app, "draft");
        app.handle_key(key(KeyCode::F(9)));
        assert_eq!(app.controller().view(), View::Login);
        assert!(app.path_input().is_empty());
    }
}
