//! Process configuration read from the environment (and `.env`)

use chrono_tz::Tz;
use telegram::BotSettings;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NOTIFY_HOUR: u32 = 8;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where ledger rows live
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    Supabase { url: String, service_key: String },
    /// Process memory, lost on restart; `link_token` links the single local account
    Memory { link_token: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub backend: Backend,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub bot: BotSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("TELOXIDE_TOKEN")
            .or_else(|| get("TELEGRAM_BOT_TOKEN"))
            .ok_or(ConfigError::Missing("TELOXIDE_TOKEN"))?;

        let backend = match get("LEDGER_BACKEND").as_deref() {
            Some("memory") => Backend::Memory {
                link_token: get("LOCAL_LINK_TOKEN").unwrap_or_else(|| "local".to_string()),
            },
            None | Some("supabase") => Backend::Supabase {
                url: get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                service_key: get("SUPABASE_SERVICE_KEY")
                    .or_else(|| get("SUPABASE_KEY"))
                    .ok_or(ConfigError::Missing("SUPABASE_SERVICE_KEY"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LEDGER_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let notify_hour = parse_or("NOTIFY_HOUR", get("NOTIFY_HOUR"), DEFAULT_NOTIFY_HOUR)?;
        if notify_hour > 23 {
            return Err(ConfigError::Invalid {
                var: "NOTIFY_HOUR",
                value: notify_hour.to_string(),
            });
        }

        let mut bot = BotSettings {
            notify_hour,
            ..BotSettings::default()
        };
        if let Some(tz) = get("BOT_TIMEZONE") {
            bot.tz = tz.parse::<Tz>().map_err(|_| ConfigError::Invalid {
                var: "BOT_TIMEZONE",
                value: tz,
            })?;
        }
        if let Some(url) = get("WEB_APP_URL") {
            bot.web_app_url = url;
        }

        Ok(Self {
            bot_token,
            backend,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            port,
            bot,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("TELOXIDE_TOKEN", "123:abc"),
        ("SUPABASE_URL", "https://proj.supabase.co"),
        ("SUPABASE_SERVICE_KEY", "service"),
    ];

    #[test]
    fn test_defaults() {
        let cfg = config(REQUIRED).unwrap();
        assert_eq!(cfg.bot_token, "123:abc");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.gemini_model, "gemini-2.0-flash");
        assert_eq!(cfg.gemini_api_key, None);
        assert_eq!(cfg.bot.notify_hour, 8);
        assert_eq!(cfg.bot.tz, chrono_tz::America::Sao_Paulo);
        assert_eq!(
            cfg.backend,
            Backend::Supabase {
                url: "https://proj.supabase.co".into(),
                service_key: "service".into()
            }
        );
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            config(&REQUIRED[1..]).unwrap_err(),
            ConfigError::Missing("TELOXIDE_TOKEN")
        );
        assert_eq!(
            config(&[("TELOXIDE_TOKEN", "t"), ("SUPABASE_SERVICE_KEY", "k")]).unwrap_err(),
            ConfigError::Missing("SUPABASE_URL")
        );
        // Blank is the same as unset
        assert!(config(&[("TELOXIDE_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_token_fallback_and_overrides() {
        let cfg = config(&[
            ("TELEGRAM_BOT_TOKEN", "fallback"),
            ("SUPABASE_URL", "https://proj.supabase.co"),
            ("SUPABASE_SERVICE_KEY", "service"),
            ("GEMINI_API_KEY", "g-key"),
            ("PORT", "8080"),
            ("NOTIFY_HOUR", "7"),
            ("BOT_TIMEZONE", "America/Manaus"),
            ("WEB_APP_URL", "https://example.com"),
        ])
        .unwrap();
        assert_eq!(cfg.bot_token, "fallback");
        assert_eq!(cfg.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bot.notify_hour, 7);
        assert_eq!(cfg.bot.tz, chrono_tz::America::Manaus);
        assert_eq!(cfg.bot.web_app_url, "https://example.com");
    }

    #[test]
    fn test_invalid_values() {
        let with = |extra: (&'static str, &'static str)| {
            let mut vars = REQUIRED.to_vec();
            vars.push(extra);
            config(&vars).unwrap_err()
        };
        assert!(matches!(with(("PORT", "http")), ConfigError::Invalid { var: "PORT", .. }));
        assert!(matches!(with(("NOTIFY_HOUR", "24")), ConfigError::Invalid { var: "NOTIFY_HOUR", .. }));
        assert!(matches!(with(("BOT_TIMEZONE", "Mars/Olympus")), ConfigError::Invalid { var: "BOT_TIMEZONE", .. }));
        assert!(matches!(with(("LEDGER_BACKEND", "sqlite")), ConfigError::Invalid { var: "LEDGER_BACKEND", .. }));
    }

    #[test]
    fn test_memory_backend_needs_no_supabase() {
        let cfg = config(&[("TELOXIDE_TOKEN", "t"), ("LEDGER_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.backend, Backend::Memory { link_token: "local".into() });
    }
}
