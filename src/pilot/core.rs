//! Core Pilot struct, construction, and session-level pass-throughs.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::remote::RemoteSession;
use crate::timing::{Clock, SystemClock};

use super::config::PilotConfig;
use super::tabs::TabRegistry;

// ============================================================================
// Pilot
// ============================================================================

/// Deterministic interaction processor bound to one remote session.
///
/// A pilot exclusively owns the set of tabs it created and converts
/// the remote end's unreliable single-shot calls into deadline-bounded
/// operations. All operations are strictly sequential per instance;
/// two pilots must never share one remote session.
///
/// # Example
///
/// ```ignore
/// use dom_pilot::{Pilot, Selector};
///
/// let pilot = Pilot::new(remote);
/// pilot.goto("https://example.com").await?;
/// let button = pilot.find_element(&Selector::css("#submit")).await?;
/// button.click().await?;
/// pilot.shutdown().await?;
/// ```
pub struct Pilot {
    /// Unique identity for log correlation.
    pub(crate) uuid: Uuid,
    /// The remote automation interface.
    pub(crate) remote: Arc<dyn RemoteSession>,
    /// Injectable time source for all polling loops.
    pub(crate) clock: Arc<dyn Clock>,
    /// Timing parameters.
    pub(crate) config: PilotConfig,
    /// Tabs this pilot owns; sole arbiter of which handles it may touch.
    pub(crate) tabs: Mutex<TabRegistry>,
    /// Pilot-scoped random source for `select_random_option`.
    pub(crate) rng: Mutex<SmallRng>,
}

impl fmt::Debug for Pilot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pilot")
            .field("uuid", &self.uuid)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Pilot - Constructors
// ============================================================================

impl Pilot {
    /// Creates a pilot with default configuration and the system clock.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteSession>) -> Self {
        Self::with_config(remote, PilotConfig::default())
    }

    /// Creates a pilot with explicit configuration.
    #[must_use]
    pub fn with_config(remote: Arc<dyn RemoteSession>, config: PilotConfig) -> Self {
        Self::with_clock(remote, config, Arc::new(SystemClock))
    }

    /// Creates a pilot with an explicit clock.
    ///
    /// Tests inject a virtual clock here so wait loops run without
    /// real sleeps.
    #[must_use]
    pub fn with_clock(
        remote: Arc<dyn RemoteSession>,
        config: PilotConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let uuid = Uuid::new_v4();
        debug!(pilot = %uuid, ?config, "Pilot created");
        Self {
            uuid,
            remote,
            clock,
            config,
            tabs: Mutex::new(TabRegistry::new()),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }
}

// ============================================================================
// Pilot - Accessors
// ============================================================================

impl Pilot {
    /// Returns this pilot's unique identity.
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    /// Returns the timing configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PilotConfig {
        &self.config
    }
}

// ============================================================================
// Pilot - Session Pass-Throughs
// ============================================================================

impl Pilot {
    /// Returns the focused tab's current URL.
    pub async fn current_url(&self) -> Result<String> {
        self.ensure_focus().await?;
        self.remote.current_url().await
    }

    /// Reloads the focused tab.
    pub async fn refresh(&self) -> Result<()> {
        debug!(pilot = %self.uuid, "Refreshing page");
        self.ensure_focus().await?;
        self.remote.refresh().await
    }

    /// Executes a script in the focused tab.
    pub async fn execute_script(&self, script: &str, args: &[Value]) -> Result<Value> {
        debug!(pilot = %self.uuid, script_len = script.len(), "Executing script");
        self.ensure_focus().await?;
        self.remote.execute_script(script, args).await
    }
}

// ============================================================================
// Pilot - Internal
// ============================================================================

impl Pilot {
    /// Re-asserts focus on the current tab before touching the DOM.
    ///
    /// Focus can drift without this pilot's involvement (a popup, an
    /// external actor on the same session), so every DOM-touching
    /// operation funnels through here first. No-op when no tab is
    /// registered as current.
    pub(crate) async fn ensure_focus(&self) -> Result<()> {
        let current = self.tabs.lock().current().cloned();
        if let Some(handle) = current {
            self.remote.switch_to_window(&handle).await?;
        }
        Ok(())
    }
}
