use std::env;

pub const DEFAULT_WATCHLIST: &[&str] = &["AAPL", "MSFT", "TSLA"];
pub const DEFAULT_SENTIMENT_THRESHOLD: f64 = 0.2;

/// Runtime configuration, read once from the environment.
///
/// Every option has a usable default so the assistant runs without any
/// environment at all — it just degrades to stub data where keys are
/// missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options-flow provider key. `None` disables flow requests entirely.
    pub unusual_whales_api_key: Option<String>,
    /// Broker credentials. Both must be present for the autopilot to be
    /// considered enabled.
    pub broker_api_key: Option<String>,
    pub broker_api_secret: Option<String>,
    /// Prefer paper/sandbox endpoints when placing orders.
    pub broker_paper: bool,
    /// Symbols to process when none are given on the command line.
    pub watchlist: Vec<String>,
    /// Sentiment above this is bullish, below its negative is bearish.
    pub sentiment_threshold: f64,
}

/// Read an environment variable, treating the empty string as unset so a
/// feature can be disabled by exporting `VAR=`.
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let watchlist = env_opt("WATCHLIST")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or_else(|| DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect());

        let sentiment_threshold = env_opt("SENTIMENT_THRESHOLD")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SENTIMENT_THRESHOLD);

        let broker_paper = env_opt("BROKER_PAPER")
            .map(|v| !matches!(v.as_str(), "0" | "false" | "False"))
            .unwrap_or(true);

        Self {
            unusual_whales_api_key: env_opt("UW_API_KEY"),
            broker_api_key: env_opt("BROKER_API_KEY"),
            broker_api_secret: env_opt("BROKER_API_SECRET"),
            broker_paper,
            watchlist,
            sentiment_threshold,
        }
    }

    /// Automatic trade execution is configured only when both broker
    /// credentials are present.
    pub fn is_autopilot_enabled(&self) -> bool {
        self.broker_api_key.is_some() && self.broker_api_secret.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unusual_whales_api_key: None,
            broker_api_key: None,
            broker_api_secret: None,
            broker_paper: true,
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            sentiment_threshold: DEFAULT_SENTIMENT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = Config::default();
        assert!(!config.is_autopilot_enabled());
        assert_eq!(config.watchlist, vec!["AAPL", "MSFT", "TSLA"]);
        assert_eq!(config.sentiment_threshold, 0.2);
        assert!(config.broker_paper);
    }

    #[test]
    fn autopilot_requires_both_credentials() {
        let mut config = Config::default();
        config.broker_api_key = Some("key".into());
        assert!(!config.is_autopilot_enabled());
        config.broker_api_secret = Some("secret".into());
        assert!(config.is_autopilot_enabled());
    }
}
