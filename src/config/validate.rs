// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `input_dir` / `output_dir` are non-empty
/// - `interval_hours`, `tick_seconds` and `parallelism` are all `>= 1`
/// - the `[email]` section, when present, has a host and parseable-looking
///   addresses (full address parsing happens in the notifier)
/// - the `[trigger]` request-file name is non-empty
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_monitor(cfg)?;
    validate_email(cfg)?;
    validate_trigger(cfg)?;
    Ok(())
}

fn validate_monitor(cfg: &ConfigFile) -> Result<()> {
    let monitor = &cfg.monitor;

    if monitor.input_dir.trim().is_empty() {
        return Err(anyhow!("[monitor].input_dir must not be empty"));
    }
    if monitor.output_dir.trim().is_empty() {
        return Err(anyhow!("[monitor].output_dir must not be empty"));
    }
    if monitor.interval_hours == 0 {
        return Err(anyhow!("[monitor].interval_hours must be >= 1 (got 0)"));
    }
    if monitor.tick_seconds == 0 {
        return Err(anyhow!("[monitor].tick_seconds must be >= 1 (got 0)"));
    }
    if monitor.parallelism == 0 {
        return Err(anyhow!("[monitor].parallelism must be >= 1 (got 0)"));
    }

    Ok(())
}

fn validate_email(cfg: &ConfigFile) -> Result<()> {
    let Some(email) = &cfg.email else {
        return Ok(());
    };

    if email.smtp_host.trim().is_empty() {
        return Err(anyhow!("[email].smtp_host must not be empty"));
    }
    if email.smtp_port == 0 {
        return Err(anyhow!("[email].smtp_port must be >= 1 (got 0)"));
    }
    if !email.from.contains('@') {
        return Err(anyhow!("[email].from does not look like an address: '{}'", email.from));
    }
    if !email.to.contains('@') {
        return Err(anyhow!("[email].to does not look like an address: '{}'", email.to));
    }

    Ok(())
}

fn validate_trigger(cfg: &ConfigFile) -> Result<()> {
    if cfg.trigger.request_file.trim().is_empty() {
        return Err(anyhow!("[trigger].request_file must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> ConfigFile {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&parse("")).is_ok());
    }

    #[test]
    fn zero_cadence_is_rejected() {
        for section in [
            "[monitor]\ninterval_hours = 0",
            "[monitor]\ntick_seconds = 0",
            "[monitor]\nparallelism = 0",
        ] {
            assert!(validate_config(&parse(section)).is_err(), "accepted: {section}");
        }
    }

    #[test]
    fn empty_input_dir_is_rejected() {
        let cfg = parse("[monitor]\ninput_dir = \"\"");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn email_addresses_are_sanity_checked() {
        let cfg = parse(
            r#"
            [email]
            smtp_host = "smtp.example.org"
            from = "not-an-address"
            to = "b@example.org"
            "#,
        );
        assert!(validate_config(&cfg).is_err());
    }
}
