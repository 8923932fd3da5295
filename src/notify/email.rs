// src/notify/email.rs

//! Email notification delivery via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport: STARTTLS relay,
//! optional credentials, multipart message with the report artifacts
//! attached. An attachment that cannot be read is logged and skipped; the
//! rest of the message is still sent.

use std::path::{Path, PathBuf};

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{error, info};

use crate::config::EmailSection;
use crate::notify::NotificationChannel;

/// Error type for notification failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(String),
}

/// Sends report emails over SMTP.
pub struct SmtpNotifier {
    smtp_host: String,
    smtp_port: u16,
    from: String,
    to: String,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
}

impl SmtpNotifier {
    /// Build a notifier from the `[email]` config section.
    ///
    /// The password comes from the environment (never from the config file
    /// or an interactive prompt); credentials are only attached when both a
    /// user and a password are present.
    pub fn new(cfg: &EmailSection, smtp_password: Option<String>) -> Self {
        Self {
            smtp_host: cfg.smtp_host.clone(),
            smtp_port: cfg.smtp_port,
            from: cfg.from.clone(),
            to: cfg.to.clone(),
            smtp_user: cfg.smtp_user.clone(),
            smtp_password,
        }
    }

    async fn build_message(
        &self,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<Message, NotifyError> {
        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(body.to_string()));

        for path in attachments {
            let bytes = match tokio::fs::read(path).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    error!(path = ?path, error = %err, "error attaching file; skipping");
                    continue;
                }
            };

            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());

            multipart = multipart
                .singlepart(Attachment::new(filename).body(bytes, content_type_for(path)));
        }

        Message::builder()
            .from(self.from.parse()?)
            .to(self.to.parse()?)
            .subject(subject)
            .multipart(multipart)
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

impl NotificationChannel for SmtpNotifier {
    async fn send(
        &self,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<(), NotifyError> {
        let email = self.build_message(subject, body, attachments).await?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)?
                .port(self.smtp_port);

        if let (Some(user), Some(pass)) = (&self.smtp_user, &self.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        info!(to = %self.to, subject, "report email sent");
        Ok(())
    }
}

fn content_type_for(path: &Path) -> ContentType {
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("txt") | Some("log") => "text/plain",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };
    ContentType::parse(mime).unwrap_or(ContentType::TEXT_PLAIN)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn notifier() -> SmtpNotifier {
        SmtpNotifier {
            smtp_host: "smtp.example.org".to_string(),
            smtp_port: 587,
            from: "monitor@example.org".to_string(),
            to: "group@example.org".to_string(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[tokio::test]
    async fn message_builds_with_attachments() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("complete_monitoring_report.txt");
        fs::write(&report, "Monitoring Report").unwrap();

        let msg = notifier()
            .build_message("MD Report", "see attachments", &[report])
            .await
            .unwrap();

        let formatted = String::from_utf8(msg.formatted()).unwrap();
        assert!(formatted.contains("complete_monitoring_report.txt"));
        assert!(formatted.contains("see attachments"));
    }

    #[tokio::test]
    async fn missing_attachment_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.svg");

        let msg = notifier()
            .build_message("MD Report", "body", &[missing])
            .await
            .unwrap();

        let formatted = String::from_utf8(msg.formatted()).unwrap();
        assert!(!formatted.contains("nope.svg"));
    }

    #[tokio::test]
    async fn bad_recipient_address_is_an_error() {
        let mut n = notifier();
        n.to = "not-an-address".to_string();

        let err = n.build_message("s", "b", &[]).await.unwrap_err();
        assert!(matches!(err, NotifyError::Address(_)));
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(
            content_type_for(Path::new("report.txt")),
            ContentType::parse("text/plain").unwrap()
        );
        assert_eq!(
            content_type_for(Path::new("chart.svg")),
            ContentType::parse("image/svg+xml").unwrap()
        );
        assert_eq!(
            content_type_for(Path::new("blob.bin")),
            ContentType::parse("application/octet-stream").unwrap()
        );
    }
}
