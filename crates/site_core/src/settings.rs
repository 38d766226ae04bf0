use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use tracing::warn;

use crate::delivery::EMAILJS_API_URL;

pub const DEFAULT_SETTINGS_FILE: &str = "site.toml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub emailjs_api_url: String,
    pub contact_recipient: String,
    pub fallback_contact: String,
    pub request_timeout_secs: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            emailjs_service_id: None,
            emailjs_template_id: None,
            emailjs_public_key: None,
            emailjs_api_url: EMAILJS_API_URL.into(),
            contact_recipient: "owner@example.com".into(),
            fallback_contact: "LinkedIn".into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// All three delivery credentials, present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl SiteSettings {
    pub fn credentials(&self) -> Option<DeliveryCredentials> {
        Some(DeliveryCredentials {
            service_id: non_blank(self.emailjs_service_id.as_deref())?,
            template_id: non_blank(self.emailjs_template_id.as_deref())?,
            public_key: non_blank(self.emailjs_public_key.as_deref())?,
        })
    }

    /// Zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    fn apply_file_values(&mut self, file_cfg: &HashMap<String, String>) {
        if let Some(v) = file_cfg.get("emailjs_service_id") {
            self.emailjs_service_id = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("emailjs_template_id") {
            self.emailjs_template_id = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("emailjs_public_key") {
            self.emailjs_public_key = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("emailjs_api_url") {
            self.emailjs_api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("contact_recipient") {
            self.contact_recipient = v.clone();
        }
        if let Some(v) = file_cfg.get("fallback_contact") {
            self.fallback_contact = v.clone();
        }
        if let Some(parsed) = file_cfg
            .get("request_timeout_secs")
            .and_then(|v| parse_timeout_secs(v))
        {
            self.request_timeout_secs = parsed;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("EMAILJS_SERVICE_ID") {
            self.emailjs_service_id = Some(v);
        }
        if let Some(v) = env("APP__EMAILJS_SERVICE_ID") {
            self.emailjs_service_id = Some(v);
        }

        if let Some(v) = env("EMAILJS_TEMPLATE_ID") {
            self.emailjs_template_id = Some(v);
        }
        if let Some(v) = env("APP__EMAILJS_TEMPLATE_ID") {
            self.emailjs_template_id = Some(v);
        }

        if let Some(v) = env("EMAILJS_PUBLIC_KEY") {
            self.emailjs_public_key = Some(v);
        }
        if let Some(v) = env("APP__EMAILJS_PUBLIC_KEY") {
            self.emailjs_public_key = Some(v);
        }

        if let Some(v) = env("APP__EMAILJS_API_URL") {
            self.emailjs_api_url = v;
        }
        if let Some(v) = env("APP__CONTACT_RECIPIENT") {
            self.contact_recipient = v;
        }
        if let Some(v) = env("APP__FALLBACK_CONTACT") {
            self.fallback_contact = v;
        }
        if let Some(parsed) =
            env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| parse_timeout_secs(&v))
        {
            self.request_timeout_secs = parsed;
        }
    }
}

/// Defaults, then `site.toml` in the working directory if present, then
/// the environment.
pub fn load_settings() -> SiteSettings {
    let mut settings = SiteSettings::default();

    if let Ok(raw) = fs::read_to_string(DEFAULT_SETTINGS_FILE) {
        match parse_file_values(&raw) {
            Ok(file_cfg) => settings.apply_file_values(&file_cfg),
            Err(err) => warn!("ignoring malformed {DEFAULT_SETTINGS_FILE}: {err}"),
        }
    }

    settings.apply_env(|name| std::env::var(name).ok());
    settings
}

/// Like [`load_settings`] but with an explicit file that must exist.
pub fn load_settings_from(path: &Path) -> anyhow::Result<SiteSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg = parse_file_values(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    let mut settings = SiteSettings::default();
    settings.apply_file_values(&file_cfg);
    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

/// Flat table of scalars. Strings are taken as-is and numbers or booleans
/// by their text, so `request_timeout_secs = 15` and `"15"` both work.
/// Arrays and tables are skipped one key at a time.
fn parse_file_values(raw: &str) -> Result<HashMap<String, String>, toml::de::Error> {
    let table = toml::from_str::<toml::Table>(raw)?;
    let mut file_cfg = HashMap::with_capacity(table.len());
    for (key, value) in table {
        let text = match value {
            toml::Value::String(v) => v,
            toml::Value::Integer(v) => v.to_string(),
            toml::Value::Float(v) => v.to_string(),
            toml::Value::Boolean(v) => v.to_string(),
            other => {
                warn!(
                    "ignoring settings key '{key}': expected a scalar, found {}",
                    other.type_str()
                );
                continue;
            }
        };
        file_cfg.insert(key, text);
    }
    Ok(file_cfg)
}

fn parse_timeout_secs(v: &str) -> Option<u64> {
    match v.trim().parse::<u64>() {
        Ok(0) => {
            warn!("ignoring request_timeout_secs '0': must be at least one second");
            None
        }
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("ignoring request_timeout_secs '{v}': {err}");
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
