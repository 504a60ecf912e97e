//! Shared test doubles: a scripted fake remote session and a virtual
//! clock, so polling loops run deterministically without real sleeps.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use dom_pilot::{
    Clock, ElementId, Error, Pilot, PilotConfig, RemoteSession, Result, Selector, TabHandle,
};

// ============================================================================
// VirtualClock
// ============================================================================

/// Clock whose `sleep` advances time instantly and records the request.
pub struct VirtualClock {
    now: Mutex<Instant>,
    pub sleeps: Mutex<Vec<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
            sleeps: Mutex::new(Vec::new()),
        })
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().len()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }

    async fn sleep(&self, duration: Duration) {
        *self.now.lock() += duration;
        self.sleeps.lock().push(duration);
    }
}

// ============================================================================
// FakeRemote
// ============================================================================

/// Mutable script/recording state behind the fake session.
#[derive(Default)]
pub struct FakeState {
    // Element lookup: per-selector scripted sequences consumed one per
    // call, then the steady-state map.
    pub scripted_finds: HashMap<String, VecDeque<Vec<ElementId>>>,
    pub scripted_errors: HashMap<String, usize>,
    pub elements: HashMap<String, Vec<ElementId>>,
    pub children: HashMap<(String, String), Vec<ElementId>>,
    pub hidden: Vec<ElementId>,
    pub selected: Vec<ElementId>,
    pub stale: Vec<ElementId>,
    pub stale_reads: Vec<ElementId>,
    pub attributes: HashMap<(String, String), String>,
    pub texts: HashMap<String, String>,

    // Recorded element traffic.
    pub lookups: HashMap<String, usize>,
    pub clicks: Vec<ElementId>,
    pub keys: Vec<(ElementId, String)>,
    pub cleared: Vec<ElementId>,

    // Navigation.
    pub navigations: Vec<String>,
    pub current_url: String,
    pub refreshes: usize,

    // Windows.
    pub window_handles: Vec<TabHandle>,
    pub focused: Option<TabHandle>,
    pub switches: Vec<TabHandle>,
    pub closed: Vec<TabHandle>,
    pub open_results: VecDeque<Vec<TabHandle>>,
    pub next_window: usize,
    pub scripts: Vec<String>,

    // Alerts.
    pub alert: Option<String>,
    pub alert_after_polls: usize,
    pub accepted: usize,
    pub dismissed: usize,
}

/// Scripted in-memory stand-in for a live browser session.
#[derive(Default)]
pub struct FakeRemote {
    pub state: Mutex<FakeState>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a fake whose session already has the given windows.
    pub fn with_windows(handles: &[&str]) -> Arc<Self> {
        let remote = Self::default();
        remote.state.lock().window_handles = handles.iter().map(|h| TabHandle::new(*h)).collect();
        Arc::new(remote)
    }

    pub fn key(selector: &Selector) -> String {
        selector.to_string()
    }

    /// Steady-state element set for a selector.
    pub fn set_elements(&self, selector: &Selector, ids: &[&str]) {
        self.state.lock().elements.insert(
            Self::key(selector),
            ids.iter().map(|id| ElementId::new(*id)).collect(),
        );
    }

    /// Per-call scripted results, consumed before the steady state.
    pub fn script_finds(&self, selector: &Selector, sequence: &[&[&str]]) {
        self.state.lock().scripted_finds.insert(
            Self::key(selector),
            sequence
                .iter()
                .map(|ids| ids.iter().map(|id| ElementId::new(*id)).collect())
                .collect(),
        );
    }

    pub fn lookup_count(&self, selector: &Selector) -> usize {
        self.state
            .lock()
            .lookups
            .get(&Self::key(selector))
            .copied()
            .unwrap_or(0)
    }

    pub fn navigations_to(&self, url: &str) -> usize {
        self.state
            .lock()
            .navigations
            .iter()
            .filter(|target| *target == url)
            .count()
    }
}

#[async_trait]
impl RemoteSession for FakeRemote {
    async fn find_elements(&self, selector: &Selector) -> Result<Vec<ElementId>> {
        let key = Self::key(selector);
        let mut state = self.state.lock();
        *state.lookups.entry(key.clone()).or_default() += 1;
        if let Some(remaining) = state.scripted_errors.get_mut(&key)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(Error::remote("lookup failed"));
        }
        if let Some(queue) = state.scripted_finds.get_mut(&key)
            && let Some(next) = queue.pop_front()
        {
            return Ok(next);
        }
        Ok(state.elements.get(&key).cloned().unwrap_or_default())
    }

    async fn find_elements_within(
        &self,
        parent: &ElementId,
        selector: &Selector,
    ) -> Result<Vec<ElementId>> {
        let key = (parent.as_str().to_string(), Self::key(selector));
        Ok(self.state.lock().children.get(&key).cloned().unwrap_or_default())
    }

    async fn is_displayed(&self, element: &ElementId) -> Result<bool> {
        let state = self.state.lock();
        if state.stale.contains(element) {
            return Err(Error::stale(element.clone()));
        }
        Ok(!state.hidden.contains(element))
    }

    async fn is_selected(&self, element: &ElementId) -> Result<bool> {
        Ok(self.state.lock().selected.contains(element))
    }

    async fn attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        if state.stale.contains(element) || state.stale_reads.contains(element) {
            return Err(Error::stale(element.clone()));
        }
        Ok(state
            .attributes
            .get(&(element.as_str().to_string(), name.to_string()))
            .cloned())
    }

    async fn text(&self, element: &ElementId) -> Result<String> {
        let state = self.state.lock();
        if state.stale.contains(element) || state.stale_reads.contains(element) {
            return Err(Error::stale(element.clone()));
        }
        Ok(state
            .texts
            .get(element.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn click(&self, element: &ElementId) -> Result<()> {
        let mut state = self.state.lock();
        if state.stale.contains(element) {
            return Err(Error::stale(element.clone()));
        }
        state.clicks.push(element.clone());
        // Clicking toggles checkbox-like state.
        if let Some(position) = state.selected.iter().position(|e| e == element) {
            state.selected.remove(position);
        } else {
            state.selected.push(element.clone());
        }
        Ok(())
    }

    async fn send_keys(&self, element: &ElementId, keys: &str) -> Result<()> {
        self.state
            .lock()
            .keys
            .push((element.clone(), keys.to_string()));
        Ok(())
    }

    async fn clear(&self, element: &ElementId) -> Result<()> {
        self.state.lock().cleared.push(element.clone());
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.navigations.push(url.to_string());
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().current_url.clone())
    }

    async fn refresh(&self) -> Result<()> {
        self.state.lock().refreshes += 1;
        Ok(())
    }

    async fn execute_script(&self, script: &str, _args: &[Value]) -> Result<Value> {
        let mut state = self.state.lock();
        state.scripts.push(script.to_string());
        if script.contains("window.open") {
            let appeared = state.open_results.pop_front().unwrap_or_else(|| {
                state.next_window += 1;
                vec![TabHandle::new(format!("w{}", state.next_window))]
            });
            state.window_handles.extend(appeared);
        }
        Ok(Value::Null)
    }

    async fn window_handles(&self) -> Result<Vec<TabHandle>> {
        Ok(self.state.lock().window_handles.clone())
    }

    async fn switch_to_window(&self, handle: &TabHandle) -> Result<()> {
        let mut state = self.state.lock();
        if !state.window_handles.contains(handle) {
            return Err(Error::remote(format!("no such window: {handle}")));
        }
        state.focused = Some(handle.clone());
        state.switches.push(handle.clone());
        Ok(())
    }

    async fn close_window(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(focused) = state.focused.take() {
            state.window_handles.retain(|h| h != &focused);
            state.closed.push(focused);
        }
        Ok(())
    }

    async fn alert_text(&self) -> Result<String> {
        let mut state = self.state.lock();
        if state.alert_after_polls > 0 {
            state.alert_after_polls -= 1;
            return Err(Error::remote("no alert present"));
        }
        state
            .alert
            .clone()
            .ok_or_else(|| Error::remote("no alert present"))
    }

    async fn accept_alert(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.accepted += 1;
        state.alert = None;
        Ok(())
    }

    async fn dismiss_alert(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.dismissed += 1;
        state.alert = None;
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Installs the test log subscriber; a no-op once one is set.
///
/// Run with `RUST_LOG=dom_pilot=debug` to see the engine's poll traffic
/// interleaved with test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fast-polling config used by most tests.
pub fn test_config() -> PilotConfig {
    PilotConfig::new()
        .with_find_timeout(Duration::from_secs(5))
        .with_navigation_retry_delay(Duration::from_millis(333))
}

/// Builds a pilot over the fake remote with a virtual clock.
pub fn pilot_with(remote: Arc<FakeRemote>, clock: Arc<VirtualClock>) -> Pilot {
    init_tracing();
    Pilot::with_clock(remote, test_config(), clock)
}
