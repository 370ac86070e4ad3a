//! Feed fetcher configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `FEED_*` environment variables and
//! configuration files; accessors fall back to defaults for anything unset.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::http::HttpClientIdentity;

/// Public test feed served for the case study this loader targets.
pub const DEFAULT_FEED_URL: &str = "https://essentialdeveloper.com/feed-case-study/test-api/feed";

/// Configuration errors detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configured feed URL is not an absolute URL.
    #[error("invalid feed url '{value}': {message}")]
    InvalidUrl {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        message: String,
    },
}

/// Settings for fetching one feed.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEED")]
pub struct FeedSettings {
    /// Absolute URL of the feed.
    pub url: Option<String>,
    /// Request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_seconds: u64,
    /// Optional user-agent override.
    pub user_agent: Option<String>,
}

impl FeedSettings {
    /// Return the configured feed URL, falling back to the public test feed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the value does not parse as an
    /// absolute URL.
    pub fn feed_url(&self) -> Result<Url, ConfigError> {
        let raw = self.url.as_deref().unwrap_or(DEFAULT_FEED_URL);
        Url::parse(raw).map_err(|error| ConfigError::InvalidUrl {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the request timeout.
    ///
    /// A configured zero is raised to one second.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }

    /// Return the outbound identity, falling back to the crate default.
    #[must_use]
    pub fn identity(&self) -> HttpClientIdentity {
        self.user_agent
            .clone()
            .map_or_else(HttpClientIdentity::default, |user_agent| {
                HttpClientIdentity { user_agent }
            })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for feed configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> FeedSettings {
        FeedSettings::load_from_iter([OsString::from("feed-fetch")]).expect("config should load")
    }

    fn with_url(url: Option<&str>) -> FeedSettings {
        FeedSettings {
            url: url.map(str::to_owned),
            timeout_seconds: 30,
            user_agent: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FEED_URL", None::<String>),
            ("FEED_TIMEOUT_SECONDS", None::<String>),
            ("FEED_USER_AGENT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.feed_url().expect("default url parses").as_str(),
            DEFAULT_FEED_URL
        );
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.identity(), HttpClientIdentity::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FEED_URL", Some("https://feeds.example.com/v1/feed".to_owned())),
            ("FEED_TIMEOUT_SECONDS", Some("5".to_owned())),
            ("FEED_USER_AGENT", Some("feed-tests/1.0".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.feed_url().expect("configured url parses").as_str(),
            "https://feeds.example.com/v1/feed"
        );
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.identity().user_agent, "feed-tests/1.0");
    }

    #[rstest]
    #[case::relative("/feed")]
    #[case::no_scheme("feeds.example.com/feed")]
    #[case::blank("")]
    fn rejects_urls_that_are_not_absolute(#[case] raw: &str) {
        let error = with_url(Some(raw)).feed_url().expect_err("url must be rejected");
        assert!(matches!(error, ConfigError::InvalidUrl { ref value, .. } if value == raw));
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let settings = FeedSettings {
            timeout_seconds: 0,
            ..with_url(None)
        };
        assert_eq!(settings.timeout(), Duration::from_secs(1));
    }
}
