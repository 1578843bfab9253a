//! Fallback chain configuration.
//!
//! The chain order and every provider credential come from the environment;
//! nothing is hardcoded apart from the well-known provider hostnames.

use std::path::PathBuf;

use passvault_core::channels::{
    DEFAULT_METHOD_ORDER, METHOD_CONSOLE, METHOD_FILE, METHOD_OUTLOOK, METHOD_YAHOO,
};

use crate::delivery::console::ConsoleStrategy;
use crate::delivery::file::{FileLogStrategy, DEFAULT_LOG_FILE};
use crate::delivery::smtp::{BodyFormat, SmtpConfig, SmtpStrategy, DEFAULT_SMTP_PORT};
use crate::delivery::DeliveryStrategy;

/// Outlook / Hotmail submission host.
const OUTLOOK_HOST: &str = "smtp.live.com";

/// Yahoo Mail submission host.
const YAHOO_HOST: &str = "smtp.mail.yahoo.com";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid port number, got {value:?}")]
    InvalidPort { var: String, value: String },

    #[error("{var} must be `html` or `plain`, got {value:?}")]
    InvalidFormat { var: String, value: String },

    #[error("unknown delivery method `{0}`")]
    UnknownMethod(String),

    #[error("no usable delivery method configured")]
    EmptyChain,
}

// ---------------------------------------------------------------------------
// NotifierConfig
// ---------------------------------------------------------------------------

/// One entry of the fallback chain.
#[derive(Debug, Clone)]
pub enum MethodConfig {
    Smtp(SmtpConfig),
    Console,
    File(PathBuf),
}

impl MethodConfig {
    pub fn name(&self) -> &str {
        match self {
            Self::Smtp(smtp) => &smtp.name,
            Self::Console => METHOD_CONSOLE,
            Self::File(_) => METHOD_FILE,
        }
    }
}

/// Ordered chain of delivery methods plus the optional audit log path.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Methods in priority order.
    pub methods: Vec<MethodConfig>,
    /// Audit log path; `None` disables auditing.
    pub audit_log: Option<PathBuf>,
}

impl NotifierConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                     | Default                           |
    /// |------------------------------|-----------------------------------|
    /// | `PIN_DELIVERY_METHODS`       | `outlook,yahoo,console,file`      |
    /// | `SMTP_<NAME>_HOST`           | known host for outlook / yahoo    |
    /// | `SMTP_<NAME>_PORT`           | `587`                             |
    /// | `SMTP_<NAME>_USER`           | -                                 |
    /// | `SMTP_<NAME>_PASSWORD`       | -                                 |
    /// | `SMTP_<NAME>_FROM`           | value of `SMTP_<NAME>_USER`       |
    /// | `SMTP_<NAME>_FORMAT`         | `html` for outlook, else `plain`  |
    /// | `PIN_LOG_FILE`               | `pin_deliveries.log`              |
    /// | `PIN_AUDIT_LOG`              | - (auditing disabled)             |
    ///
    /// Any method name other than `console` or `file` is an SMTP provider
    /// when it is `outlook`, `yahoo`, or has `SMTP_<NAME>_HOST` set; anything
    /// else is a [`ConfigError::UnknownMethod`]. An SMTP provider without
    /// both a user and a password is left out of the chain.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let order: Vec<String> = match var("PIN_DELIVERY_METHODS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_METHOD_ORDER.iter().map(|s| s.to_string()).collect(),
        };

        let mut methods = Vec::with_capacity(order.len());
        for name in order {
            match name.as_str() {
                METHOD_CONSOLE => methods.push(MethodConfig::Console),
                METHOD_FILE => {
                    let path = var("PIN_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
                    methods.push(MethodConfig::File(PathBuf::from(path)));
                }
                _ => {
                    let Some(host) = smtp_host(&name, &var) else {
                        return Err(ConfigError::UnknownMethod(name));
                    };
                    if let Some(smtp) = smtp_config(&name, host, &var)? {
                        methods.push(MethodConfig::Smtp(smtp));
                    }
                }
            }
        }

        if methods.is_empty() {
            return Err(ConfigError::EmptyChain);
        }

        Ok(Self {
            methods,
            audit_log: var("PIN_AUDIT_LOG").map(PathBuf::from),
        })
    }

    /// Method names in priority order.
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(MethodConfig::name).collect()
    }

    /// Instantiate one strategy per configured method, in order.
    pub fn build_strategies(&self) -> Vec<Box<dyn DeliveryStrategy>> {
        self.methods
            .iter()
            .map(|method| -> Box<dyn DeliveryStrategy> {
                match method {
                    MethodConfig::Smtp(smtp) => Box::new(SmtpStrategy::new(smtp.clone())),
                    MethodConfig::Console => Box::new(ConsoleStrategy::new()),
                    MethodConfig::File(path) => Box::new(FileLogStrategy::new(path.clone())),
                }
            })
            .collect()
    }
}

/// `SMTP_<NAME>_<suffix>` for provider `name`.
fn smtp_key(name: &str, suffix: &str) -> String {
    format!("SMTP_{}_{suffix}", name.to_ascii_uppercase().replace('-', "_"))
}

/// Host for SMTP provider `name`.
///
/// `None` means `name` is neither a well-known provider nor one with
/// `SMTP_<NAME>_HOST` set, so it is not an SMTP provider at all.
fn smtp_host<V>(name: &str, var: &V) -> Option<String>
where
    V: Fn(&str) -> Option<String>,
{
    var(&smtp_key(name, "HOST")).or_else(|| match name {
        METHOD_OUTLOOK => Some(OUTLOOK_HOST.to_string()),
        METHOD_YAHOO => Some(YAHOO_HOST.to_string()),
        _ => None,
    })
}

/// Resolve the settings for SMTP provider `name` served by `host`.
///
/// Returns `Ok(None)` when the provider has no credentials.
fn smtp_config<V>(name: &str, host: String, var: &V) -> Result<Option<SmtpConfig>, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    let key = |suffix: &str| smtp_key(name, suffix);

    let (username, password) = match (var(&key("USER")), var(&key("PASSWORD"))) {
        (Some(user), Some(pass)) => (user, pass),
        _ => {
            tracing::warn!(provider = name, "SMTP provider has no credentials, skipping");
            return Ok(None);
        }
    };

    let port = match var(&key("PORT")) {
        Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
            var: key("PORT"),
            value,
        })?,
        None => DEFAULT_SMTP_PORT,
    };

    let format = match var(&key("FORMAT")) {
        Some(value) => BodyFormat::parse(&value).ok_or_else(|| ConfigError::InvalidFormat {
            var: key("FORMAT"),
            value,
        })?,
        None if name == METHOD_OUTLOOK => BodyFormat::Html,
        None => BodyFormat::Plain,
    };

    Ok(Some(SmtpConfig {
        name: name.to_string(),
        host,
        port,
        from_address: var(&key("FROM")).unwrap_or_else(|| username.clone()),
        username,
        password,
        format,
    }))
}
