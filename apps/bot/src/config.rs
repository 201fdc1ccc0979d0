use std::path::PathBuf;

use anyhow::{Context, Result};

/// Bot configuration loaded from environment variables (and `.env`, loaded in `main`).
/// Startup aborts if either secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Scratch directory for downloaded resumes.
    pub upload_dir: PathBuf,
    /// Keep uploaded PDFs after extraction instead of deleting them.
    pub retain_uploads: bool,
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            telegram_bot_token: require_env("TELEGRAM_BOT_TOKEN")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("ats-bot")),
            retain_uploads: std::env::var("RETAIN_UPLOADS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(v), "{v} should be truthy");
        }
    }

    #[test]
    fn test_parse_flag_rejects_everything_else() {
        for v in ["0", "false", "", "nope"] {
            assert!(!parse_flag(v), "{v} should be falsy");
        }
    }

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("ATS_BOT_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("ATS_BOT_TEST_SURELY_UNSET_VARIABLE"));
    }
}
