//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Mail Settings
//!
//! ```bash
//! export RESEND_API_KEY="re_..."
//! export ADMIN_EMAIL="admin@example.com"
//! ```
//!
//! Both are required to deliver notifications, but neither blocks startup:
//! they are checked on every request and a missing value fails that request
//! with `500` instead of silently dropping the registration.
//!
//! ## Optional Variables
//!
//! - `EMAIL_FROM` - Sender address (default: `Registration System <onboarding@resend.dev>`)
//! - `RESEND_API_URL` - Email provider base URL (default: `https://api.resend.com`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RATE_LIMIT_SWEEP_SECONDS` - Period of the expired-entry sweep (default: 300)

use anyhow::Result;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::domain::sweeper::DEFAULT_SWEEP_INTERVAL;
use crate::error::AppError;
use crate::infrastructure::email::DEFAULT_RESEND_API_URL;

/// Sender used when `EMAIL_FROM` is not set.
pub const DEFAULT_EMAIL_FROM: &str = "Registration System <onboarding@resend.dev>";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub mail: MailSettings,
    /// Base URL of the Resend API. Overridable for local mock servers.
    pub resend_api_url: String,
    /// Seconds between sweeps of expired rate-limit entries.
    pub sweep_interval_seconds: u64,
}

/// Email delivery settings, resolved per request.
#[derive(Clone, Default)]
pub struct MailSettings {
    pub api_key: Option<String>,
    pub admin_email: Option<String>,
    pub from_address: String,
}

/// Mail settings that passed the per-request configuration check.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMail<'a> {
    pub api_key: &'a str,
    pub admin_email: &'a str,
    pub from_address: &'a str,
}

impl MailSettings {
    pub fn new(
        api_key: Option<String>,
        admin_email: Option<String>,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|v| !v.trim().is_empty()),
            admin_email: admin_email.filter(|v| !v.trim().is_empty()),
            from_address: from_address.into(),
        }
    }

    fn from_env() -> Self {
        Self::new(
            env::var("RESEND_API_KEY").ok(),
            env::var("ADMIN_EMAIL").ok(),
            env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string()),
        )
    }

    /// Fails closed when a required setting is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] naming the first missing setting.
    pub fn resolve(&self) -> Result<ResolvedMail<'_>, AppError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("RESEND_API_KEY is not configured");
            return Err(AppError::configuration("Email service is not configured"));
        };

        let Some(admin_email) = self.admin_email.as_deref() else {
            tracing::error!("ADMIN_EMAIL is not configured");
            return Err(AppError::configuration("Admin email is not configured"));
        };

        Ok(ResolvedMail {
            api_key,
            admin_email,
            from_address: &self.from_address,
        })
    }

    /// Names of required settings that are currently missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("RESEND_API_KEY");
        }
        if self.admin_email.is_none() {
            missing.push("ADMIN_EMAIL");
        }
        missing
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .field("admin_email", &self.admin_email)
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let resend_api_url =
            env::var("RESEND_API_URL").unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string());

        let sweep_interval_seconds = match env::var("RATE_LIMIT_SWEEP_SECONDS") {
            Ok(v) => v.parse().map_err(|_| {
                anyhow::anyhow!("RATE_LIMIT_SWEEP_SECONDS must be a whole number, got '{v}'")
            })?,
            Err(_) => DEFAULT_SWEEP_INTERVAL.as_secs(),
        };

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            mail: MailSettings::from_env(),
            resend_api_url,
            sweep_interval_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// Missing mail settings are not an error here; see [`MailSettings::resolve`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `resend_api_url` is not an http(s) URL
    /// - `sweep_interval_seconds` is zero
    /// - `mail.from_address` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.resend_api_url.starts_with("http://") && !self.resend_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "RESEND_API_URL must start with 'http://' or 'https://', got '{}'",
                self.resend_api_url
            );
        }

        if self.sweep_interval_seconds == 0 {
            anyhow::bail!("RATE_LIMIT_SWEEP_SECONDS must be greater than 0");
        }

        if self.mail.from_address.trim().is_empty() {
            anyhow::bail!("EMAIL_FROM must not be empty");
        }

        Ok(())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Email provider: {}", self.resend_api_url);
        tracing::info!("  Sender: {}", self.mail.from_address);

        match self.mail.api_key.as_deref() {
            Some(key) => tracing::info!("  API key: {}", mask_secret(key)),
            None => tracing::warn!("  API key: missing, notifications will fail"),
        }

        match self.mail.admin_email.as_deref() {
            Some(admin) => tracing::info!("  Admin recipient: {}", admin),
            None => tracing::warn!("  Admin recipient: missing, notifications will fail"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Rate limit sweep: every {}s", self.sweep_interval_seconds);
    }
}

/// Keeps a short recognizable prefix of a secret and masks the rest.
///
/// `re_123456789` → `re_***`
fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(3).collect();
    format!("{prefix}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            mail: MailSettings::new(
                Some("re_test".to_string()),
                Some("admin@example.com".to_string()),
                DEFAULT_EMAIL_FROM,
            ),
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            sweep_interval_seconds: 300,
        }
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("re_123456789"), "re_***");
        assert_eq!(mask_secret("ab"), "ab***");
    }

    #[test]
    fn test_mail_settings_debug_masks_key() {
        let settings = test_config().mail;
        let debug = format!("{settings:?}");

        assert!(debug.contains("re_***"));
        assert!(!debug.contains("re_test"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.resend_api_url = "ftp://mail.example.com".to_string();
        assert!(config.validate().is_err());

        config.resend_api_url = "http://127.0.0.1:8025".to_string();
        assert!(config.validate().is_ok());

        config.sweep_interval_seconds = 0;
        assert!(config.validate().is_err());

        config.sweep_interval_seconds = 60;
        config.mail.from_address = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_mail_settings_still_valid() {
        let mut config = test_config();
        config.mail = MailSettings::new(None, None, DEFAULT_EMAIL_FROM);

        assert!(config.validate().is_ok());
        assert_eq!(config.mail.missing(), vec!["RESEND_API_KEY", "ADMIN_EMAIL"]);
    }

    #[test]
    fn test_resolve_complete_settings() {
        let config = test_config();
        let resolved = config.mail.resolve().unwrap();

        assert_eq!(resolved.api_key, "re_test");
        assert_eq!(resolved.admin_email, "admin@example.com");
        assert_eq!(resolved.from_address, DEFAULT_EMAIL_FROM);
    }

    #[test]
    fn test_resolve_missing_api_key() {
        let settings = MailSettings::new(None, Some("admin@example.com".into()), DEFAULT_EMAIL_FROM);

        let err = settings.resolve().unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref message } if message == "Email service is not configured"));
    }

    #[test]
    fn test_resolve_missing_admin_email() {
        let settings = MailSettings::new(Some("re_test".into()), None, DEFAULT_EMAIL_FROM);

        let err = settings.resolve().unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref message } if message == "Admin email is not configured"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let settings = MailSettings::new(Some("".into()), Some("  ".into()), DEFAULT_EMAIL_FROM);

        assert_eq!(settings.missing(), vec!["RESEND_API_KEY", "ADMIN_EMAIL"]);
        assert!(settings.resolve().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("LISTEN");
            env::remove_var("LOG_FORMAT");
            env::remove_var("EMAIL_FROM");
            env::remove_var("RESEND_API_URL");
            env::remove_var("RATE_LIMIT_SWEEP_SECONDS");
            env::set_var("RESEND_API_KEY", "re_from_env");
            env::set_var("ADMIN_EMAIL", "ops@example.com");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.resend_api_url, DEFAULT_RESEND_API_URL);
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert_eq!(config.mail.from_address, DEFAULT_EMAIL_FROM);
        assert_eq!(config.mail.api_key.as_deref(), Some("re_from_env"));
        assert_eq!(config.mail.admin_email.as_deref(), Some("ops@example.com"));

        // Cleanup
        unsafe {
            env::remove_var("RESEND_API_KEY");
            env::remove_var("ADMIN_EMAIL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_sweep_interval() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("RATE_LIMIT_SWEEP_SECONDS", "five minutes");
        }

        assert!(Config::from_env().is_err());

        // Cleanup
        unsafe {
            env::remove_var("RATE_LIMIT_SWEEP_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_without_mail_settings() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("RESEND_API_KEY");
            env::remove_var("ADMIN_EMAIL");
            env::remove_var("LISTEN");
            env::remove_var("LOG_FORMAT");
            env::remove_var("EMAIL_FROM");
            env::remove_var("RESEND_API_URL");
            env::remove_var("RATE_LIMIT_SWEEP_SECONDS");
        }

        let config = load_from_env().unwrap();
        assert!(config.mail.resolve().is_err());
    }
}
