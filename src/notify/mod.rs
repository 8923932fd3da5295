// src/notify/mod.rs

//! Notification delivery.
//!
//! [`NotificationChannel`] is the narrow seam the monitor loop talks to:
//! one `send` with a subject, a body and a list of files to attach.
//! Delivery failures are reported to the caller but are never fatal to a
//! report run — the artifacts are already on disk by the time we notify.
//!
//! The shipped implementation is [`SmtpNotifier`] (`email.rs`), built on
//! the `lettre` async SMTP transport.

pub mod email;

use std::future::Future;
use std::path::PathBuf;

pub use email::{NotifyError, SmtpNotifier};

/// External channel used to deliver report artifacts.
pub trait NotificationChannel: Send + Sync + 'static {
    /// Deliver `body` under `subject` with the given files attached.
    fn send(
        &self,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
