//! # noticelens-core
//!
//! **Upload an IRS notice, get a plain-language breakdown.**
//!
//! `noticelens-core` is the client side of noticelens: a five-view state
//! machine (login, register, dashboard, analyzing, summary), a mock
//! classifier that recognizes CP23 and CP503C notices by filename, an HTTP
//! gateway for the opaque register/login endpoints, and the small pieces
//! around them (toast slot, history list, clipboard export).
//!
//! ## Quick Start
//!
//! ```no_run
//! use noticelens_core::{ClientConfig, Controller, UploadedFile, User, run_analysis};
//!
//! # async fn demo() -> noticelens_core::Result<()> {
//! let mut app = Controller::signed_in(ClientConfig::default(), User::from_login("me@example.com"));
//! let outcome = run_analysis(&mut app, UploadedFile::new("CP23_2024.pdf", "application/pdf")).await?;
//! println!("{outcome:?}: {}", app.state().active_notice.unwrap().amount_due());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! UI → [`Controller`] → [`Ticket`] → tokio task → [`AppEvent`] → [`Controller::handle_event`]
//!
//! The controller is the only thing that mutates [`AppState`]. Async work
//! reports back over a channel; completions for cancelled or superseded
//! tickets are discarded.
//!
//! Every notice type implements the [`NoticeTemplate`] trait. The
//! [`Classifier`] tries them in registration order and the first match wins.

pub mod auth;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod notice;
pub mod notices;
pub mod password;
pub mod pipeline;
pub mod session;
pub mod toast;
pub mod upload;

pub use auth::{
    AuthError, AuthGateway, AuthResponse, HttpAuthGateway, LoginPayload, RegisterPayload,
    RemoteUser,
};
pub use classifier::Classifier;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::ClientConfig;
pub use controller::{AnalysisOutcome, AppState, Controller, OperationKind, Ticket, View};
pub use error::{Error, Result};
pub use history::{HISTORY_LIMIT, History, HistoryEntry};
pub use notice::{NoticeInfo, NoticeKind, NoticeRecord, NoticeTemplate, TemplateKind, format_usd};
pub use notices::all_notices;
pub use password::Strength;
pub use pipeline::{ANALYSIS_DELAY, AppEvent, run_analysis};
pub use session::{Session, User};
pub use toast::{TOAST_DURATION, Toast, ToastKind, ToastMessage};
pub use upload::{PDF_MIME, UploadedFile};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
