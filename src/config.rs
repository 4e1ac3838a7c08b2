use std::{env, fmt, time::Duration};

use crate::{error::Error, models::url::DEFAULT_BASE_URL, result::Result};

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "RAINDROPIO_API_TOKEN";

/// Environment variable overriding the API base path.
pub const BASE_URL_VAR: &str = "RAINDROPIO_BASE_URL";

/// Settings for a [`RaindropIo`] repository.
///
/// [`RaindropIo`]: crate::repository::RaindropIo
#[derive(Clone)]
pub struct Config {
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) max_items_per_request: usize,
    pub(crate) per_page: u32,
    pub(crate) page_pause: Duration,
    pub(crate) overwrite_pause: Duration,
}

impl Config {
    /// Default limit of raindrops per bulk request.
    pub const MAX_ITEMS_PER_REQUEST: usize = 100;
    /// Default page size of bulk reads.
    pub const PER_PAGE: u32 = 50;
    /// Default pause between consecutive page or chunk requests.
    pub const PAGE_PAUSE: Duration = Duration::from_secs(1);
    /// Default pause between clearing and setting tags.
    pub const OVERWRITE_PAUSE: Duration = Duration::from_secs(5);

    /// Creates a configuration with the default settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_items_per_request: Self::MAX_ITEMS_PER_REQUEST,
            per_page: Self::PER_PAGE,
            page_pause: Self::PAGE_PAUSE,
            overwrite_pause: Self::OVERWRITE_PAUSE,
        }
    }

    /// Reads the token from `RAINDROPIO_API_TOKEN` and, if set, the base
    /// path from `RAINDROPIO_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] if the token is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::validation(format!("{TOKEN_VAR} is not set")))?;
        let mut config = Self::new(token);
        if let Some(base) = lookup(BASE_URL_VAR).filter(|b| !b.is_empty()) {
            config.base_url = base;
        }
        Ok(config)
    }

    /// Sets the API base path.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the most raindrops sent in one bulk request.
    #[must_use]
    pub fn with_max_items_per_request(mut self, max: usize) -> Self {
        self.max_items_per_request = max;
        self
    }

    /// Sets the page size of bulk reads.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the pause between consecutive page or chunk requests.
    #[must_use]
    pub fn with_page_pause(mut self, pause: Duration) -> Self {
        self.page_pause = pause;
        self
    }

    /// Sets the pause between clearing and setting tags.
    #[must_use]
    pub fn with_overwrite_pause(mut self, pause: Duration) -> Self {
        self.overwrite_pause = pause;
        self
    }

    /// Returns the API base path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the most raindrops sent in one bulk request.
    pub fn max_items_per_request(&self) -> usize {
        self.max_items_per_request
    }

    /// Returns the page size of bulk reads.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_items_per_request", &self.max_items_per_request)
            .field("per_page", &self.per_page)
            .field("page_pause", &self.page_pause)
            .field("overwrite_pause", &self.overwrite_pause)
            .finish()
    }
}
