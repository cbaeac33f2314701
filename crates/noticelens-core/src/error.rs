use thiserror::Error;

use crate::auth::{AuthError, PASSWORD_MISMATCH_MESSAGE};
use crate::clipboard::ClipboardError;
use crate::controller::View;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot {action} from the {from} view")]
    InvalidTransition { from: View, action: &'static str },

    #[error("{}", PASSWORD_MISMATCH_MESSAGE)]
    PasswordMismatch,

    #[error("expected application/pdf, got {mime_type}")]
    NotPdf { mime_type: String },

    #[error("ticket {0} is no longer current")]
    StaleTicket(u64),

    #[error("no history entry with id {0}")]
    UnknownHistoryEntry(u64),

    #[error("no notice is selected")]
    NoActiveNotice,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

pub type Result<T> = std::result::Result<T, Error>;
