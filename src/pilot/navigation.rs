//! URL loading with HTTP-level retry and error-page detection.
//!
//! Browsers surface transient network failures as an internal error
//! page rather than a thrown error, so "did the load succeed" is
//! necessarily a DOM visibility check, not a status code.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::selector::Selector;

use super::Pilot;

// ============================================================================
// Constants
// ============================================================================

/// Neutral page navigated to between failed attempts.
const BLANK_PAGE: &str = "about:blank";

/// Number of blank-response probes per navigation attempt.
const BODY_PROBE_ATTEMPTS: u32 = 3;

/// Budget for each "has the page produced any content" probe.
const BODY_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Browser-native error page markers, by engine.
const ERROR_PAGE_SELECTORS: &[&str] = &[
    // Firefox
    "#errorPageContainer",
    "body.neterror",
    // Chromium
    "#main-frame-error",
];

// ============================================================================
// NavigateOptions
// ============================================================================

/// Options for a navigation; unset fields fall back to the pilot
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    /// Number of full navigation attempts.
    pub retries: Option<u32>,
    /// Delay between attempts, after the blank-page reset.
    pub retry_delay: Option<Duration>,
}

impl NavigateOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attempt count.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }
}

// ============================================================================
// Pilot - Navigation
// ============================================================================

impl Pilot {
    /// Navigates the current tab to `url` with the configured retry
    /// budget.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.goto_with(url, NavigateOptions::default()).await
    }

    /// Navigates with explicit options.
    ///
    /// Opens a tab first when none exists. Returns without issuing any
    /// navigation command when the current URL already equals the
    /// target. Each attempt re-issues navigation on a blank response
    /// and checks for a browser error page; failed attempts reset to a
    /// neutral blank page before retrying.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NavigationFailed`] when every attempt landed on
    /// an error page.
    pub async fn goto_with(&self, url: &str, options: NavigateOptions) -> Result<()> {
        let retries = options.retries.unwrap_or(self.config.navigation_retries);
        let retry_delay = options
            .retry_delay
            .unwrap_or(self.config.navigation_retry_delay);

        self.ensure_any_tab().await?;

        // Idempotence: already there, nothing to do.
        if let Ok(current) = self.remote.current_url().await
            && urls_equal(&current, url)
        {
            debug!(pilot = %self.uuid, url, "Already at target URL, skipping navigation");
            return Ok(());
        }

        let body_content = Selector::css("body *");
        for attempt in 1..=retries {
            debug!(pilot = %self.uuid, url, attempt, retries, "Navigating");
            self.remote.navigate(url).await?;

            // A blank or interstitial response renders no body content;
            // re-issue the navigation rather than waiting out the clock.
            for _ in 0..BODY_PROBE_ATTEMPTS {
                if self
                    .wait_for_element_to_exist(&body_content, BODY_PROBE_TIMEOUT)
                    .await
                {
                    break;
                }
                warn!(pilot = %self.uuid, url, attempt, "Blank page after navigation, re-issuing");
                self.remote.navigate(url).await?;
            }

            if !self.error_page_visible().await {
                info!(pilot = %self.uuid, url, attempt, "Navigation succeeded");
                return Ok(());
            }

            warn!(pilot = %self.uuid, url, attempt, "Browser error page detected");
            self.remote.navigate(BLANK_PAGE).await?;
            self.clock.sleep(retry_delay).await;
        }

        Err(Error::navigation_failed(url, retries))
    }

    /// Ensures some owned tab is focused, opening a blank one when the
    /// registry is empty.
    async fn ensure_any_tab(&self) -> Result<()> {
        let current = self.tabs.lock().current().cloned();
        if current.is_some() {
            return self.ensure_focus().await;
        }

        let first = self.tabs.lock().handles().into_iter().next();
        match first {
            // A tab exists but focus is undefined (current tab was
            // closed earlier); fall back to the oldest owned tab.
            Some(handle) => self.switch_to_tab(&handle).await,
            None => self.new_tab(BLANK_PAGE).await.map(|_| ()),
        }
    }

    /// Returns whether a browser-native error page is visible.
    async fn error_page_visible(&self) -> bool {
        for marker in ERROR_PAGE_SELECTORS {
            if self.probe_visible(&Selector::css(*marker)).await {
                return true;
            }
        }
        false
    }
}

// ============================================================================
// URL Comparison
// ============================================================================

/// Compares two URLs as parsed values, falling back to string equality
/// for anything unparseable.
fn urls_equal(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(parsed_a), Ok(parsed_b)) => parsed_a == parsed_b,
        _ => a == b,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_equal_exact() {
        assert!(urls_equal("https://example.com/a", "https://example.com/a"));
    }

    #[test]
    fn test_urls_equal_normalizes_root_path() {
        assert!(urls_equal("https://example.com", "https://example.com/"));
    }

    #[test]
    fn test_urls_differ() {
        assert!(!urls_equal("https://example.com/a", "https://example.com/b"));
    }

    #[test]
    fn test_blank_page_compares_equal() {
        assert!(urls_equal("about:blank", "about:blank"));
    }

    #[test]
    fn test_unparseable_falls_back_to_string_equality() {
        assert!(urls_equal("not a url", "not a url"));
        assert!(!urls_equal("not a url", "also not a url"));
    }
}
