//! Async side of the controller: the analysis delay and auth requests.
//!
//! Each operation runs on a tokio task holding a [`Ticket`]. When it finishes
//! it sends an [`AppEvent`] back to the thread that owns the [`Controller`],
//! which applies it with [`Controller::handle_event`]. Cancelling the ticket
//! ends the task early without sending anything.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::auth::{AuthError, AuthGateway, AuthResponse, LoginPayload, RegisterPayload};
use crate::controller::{AnalysisOutcome, Controller, Ticket};
use crate::error::Result;
use crate::upload::UploadedFile;

/// Simulated processing time between upload and classification.
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

/// Completion of an async operation, addressed by ticket id.
#[derive(Debug)]
pub enum AppEvent {
    AuthFinished {
        ticket: u64,
        result: std::result::Result<AuthResponse, AuthError>,
    },
    AnalysisReady {
        ticket: u64,
    },
}

// ---------------------------------------------------------------------------
// Waits
// ---------------------------------------------------------------------------

/// Sleep for `delay`. Returns `false` if the ticket was cancelled first.
pub async fn wait_analysis(ticket: &Ticket, delay: Duration) -> bool {
    tokio::select! {
        _ = ticket.token().cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

pub async fn login(
    gateway: &dyn AuthGateway,
    ticket: &Ticket,
    payload: &LoginPayload,
) -> std::result::Result<AuthResponse, AuthError> {
    tokio::select! {
        _ = ticket.token().cancelled() => Err(AuthError::Cancelled),
        result = gateway.login(payload) => result,
    }
}

pub async fn register(
    gateway: &dyn AuthGateway,
    ticket: &Ticket,
    payload: &RegisterPayload,
) -> std::result::Result<AuthResponse, AuthError> {
    tokio::select! {
        _ = ticket.token().cancelled() => Err(AuthError::Cancelled),
        result = gateway.register(payload) => result,
    }
}

// ---------------------------------------------------------------------------
// Spawners
// ---------------------------------------------------------------------------

pub fn spawn_analysis(
    ticket: Ticket,
    delay: Duration,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if wait_analysis(&ticket, delay).await {
            let _ = events.send(AppEvent::AnalysisReady { ticket: ticket.id });
        } else {
            debug!("analysis ticket {} cancelled", ticket.id);
        }
    })
}

pub fn spawn_login(
    gateway: Arc<dyn AuthGateway>,
    ticket: Ticket,
    payload: LoginPayload,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = login(gateway.as_ref(), &ticket, &payload).await;
        finish_auth(&ticket, result, &events);
    })
}

pub fn spawn_register(
    gateway: Arc<dyn AuthGateway>,
    ticket: Ticket,
    payload: RegisterPayload,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = register(gateway.as_ref(), &ticket, &payload).await;
        finish_auth(&ticket, result, &events);
    })
}

fn finish_auth(
    ticket: &Ticket,
    result: std::result::Result<AuthResponse, AuthError>,
    events: &UnboundedSender<AppEvent>,
) {
    if matches!(result, Err(AuthError::Cancelled)) {
        debug!("auth ticket {} cancelled", ticket.id);
        return;
    }
    // The receiver is gone only when the app is shutting down.
    let _ = events.send(AppEvent::AuthFinished {
        ticket: ticket.id,
        result,
    });
}

// ---------------------------------------------------------------------------
// Starters
// ---------------------------------------------------------------------------

/// Begin a login on `controller` and send it through `gateway`.
pub fn start_login(
    controller: &mut Controller,
    gateway: Arc<dyn AuthGateway>,
    events: UnboundedSender<AppEvent>,
) -> Result<JoinHandle<()>> {
    let (ticket, payload) = controller.begin_login()?;
    Ok(spawn_login(gateway, ticket, payload, events))
}

/// Begin a registration and send it through `gateway`. A password mismatch
/// returns the error before anything is spawned.
pub fn start_register(
    controller: &mut Controller,
    gateway: Arc<dyn AuthGateway>,
    events: UnboundedSender<AppEvent>,
) -> Result<JoinHandle<()>> {
    let (ticket, payload) = controller.begin_register()?;
    Ok(spawn_register(gateway, ticket, payload, events))
}

// ---------------------------------------------------------------------------
// Headless
// ---------------------------------------------------------------------------

/// Submit, wait out the delay, classify. For callers without an event loop.
pub async fn run_analysis(
    controller: &mut Controller,
    file: UploadedFile,
) -> Result<AnalysisOutcome> {
    let ticket = controller.submit_file(file)?;
    let delay = controller.config().analysis_delay;
    wait_analysis(&ticket, delay).await;
    controller.complete_analysis(ticket.id)
}
