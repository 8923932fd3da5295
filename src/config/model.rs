// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [monitor]
/// input_dir = "/data/simulations"
/// output_dir = "/data/reports"
/// interval_hours = 6
///
/// [email]
/// smtp_host = "smtp.example.org"
/// from = "monitor@example.org"
/// to = "group@example.org"
///
/// [trigger]
/// request_file = "report.request"
/// ```
///
/// All sections are optional and have reasonable defaults, except `[email]`:
/// when it is absent, no notification is sent (report artifacts are still
/// written).
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Scan roots, cadence and parallelism from `[monitor]`.
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Optional SMTP delivery settings from `[email]`.
    #[serde(default)]
    pub email: Option<EmailSection>,

    /// On-demand trigger settings from `[trigger]`.
    #[serde(default)]
    pub trigger: TriggerSection,
}

/// `[monitor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Directory containing the `*_MDS` unit directories.
    #[serde(default = "default_dir")]
    pub input_dir: String,

    /// Directory where the report and charts are written.
    #[serde(default = "default_dir")]
    pub output_dir: String,

    /// Scheduled report cadence, in hours.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,

    /// Polling tick of the monitor loop, in seconds.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,

    /// Upper bound on concurrently processed units.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_interval_hours() -> u64 {
    6
}

fn default_tick_seconds() -> u64 {
    60
}

fn default_parallelism() -> usize {
    8
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            input_dir: default_dir(),
            output_dir: default_dir(),
            interval_hours: default_interval_hours(),
            tick_seconds: default_tick_seconds(),
            parallelism: default_parallelism(),
        }
    }
}

impl MonitorSection {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours * 3600)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_seconds)
    }
}

/// `[email]` section.
///
/// The SMTP password is deliberately not part of the file; it comes from the
/// `MDWATCH_SMTP_PASSWORD` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSection {
    /// SMTP relay hostname.
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// RFC 5322 "From" address.
    pub from: String,

    /// Recipient address for the report.
    pub to: String,

    /// Optional SMTP username; credentials are only used when both the user
    /// and the environment-provided password are present.
    #[serde(default)]
    pub smtp_user: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

/// `[trigger]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSection {
    /// Request-file name; creating this file requests an immediate report.
    /// Relative paths are resolved against the output directory.
    #[serde(default = "default_request_file")]
    pub request_file: String,
}

fn default_request_file() -> String {
    "report.request".to_string()
}

impl Default for TriggerSection {
    fn default() -> Self {
        Self {
            request_file: default_request_file(),
        }
    }
}

impl TriggerSection {
    /// Absolute location of the request file for a given output directory.
    pub fn request_path(&self, output_dir: &Path) -> PathBuf {
        let path = Path::new(&self.request_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            output_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let cfg: ConfigFile = toml::from_str("").unwrap();

        assert_eq!(cfg.monitor.input_dir, ".");
        assert_eq!(cfg.monitor.interval_hours, 6);
        assert_eq!(cfg.monitor.tick_seconds, 60);
        assert_eq!(cfg.monitor.parallelism, 8);
        assert!(cfg.email.is_none());
        assert_eq!(cfg.trigger.request_file, "report.request");
    }

    #[test]
    fn email_section_defaults_port() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [email]
            smtp_host = "smtp.example.org"
            from = "a@example.org"
            to = "b@example.org"
            "#,
        )
        .unwrap();

        let email = cfg.email.unwrap();
        assert_eq!(email.smtp_port, 587);
        assert!(email.smtp_user.is_none());
    }

    #[test]
    fn relative_request_file_resolves_against_output_dir() {
        let trigger = TriggerSection::default();
        assert_eq!(
            trigger.request_path(Path::new("/data/reports")),
            PathBuf::from("/data/reports/report.request")
        );

        let absolute = TriggerSection {
            request_file: "/run/mdwatch.request".to_string(),
        };
        assert_eq!(
            absolute.request_path(Path::new("/data/reports")),
            PathBuf::from("/run/mdwatch.request")
        );
    }
}
