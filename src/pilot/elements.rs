//! Element finding, condition waiting, and property reads.
//!
//! This is the engine that turns "does X hold for the DOM right now"
//! into "does X hold for the DOM within T". Two families with
//! deliberately different failure behavior:
//!
//! - **Finders** ([`Pilot::find_element`], [`Pilot::find_elements`])
//!   are hard requirements: they poll until a match appears and err
//!   with [`crate::Error::NotFound`] when the deadline passes.
//! - **Waiters** (`wait_for_*`) are advisory pre-conditions: they poll
//!   the same way but never err, returning whether the condition held
//!   when the wait ended.
//!
//! Transient remote failures inside any poll loop are swallowed; a
//! lookup that throws is indistinguishable from an element that is not
//! yet rendered.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::remote::RemoteSession;
use crate::selector::Selector;
use crate::timing::{Deadline, retry_until_some};

use super::Pilot;
use super::config::INDEFINITE_WAIT;
use super::element::Element;

// ============================================================================
// Types
// ============================================================================

/// Quantifier over a set of selectors in a composite wait.
#[derive(Debug, Clone, Copy)]
enum Quantifier {
    /// Every selector must satisfy the condition.
    All,
    /// At least one selector must satisfy the condition.
    Any,
}

/// Options for a property read.
///
/// One options value instead of per-combination method variants; the
/// defaults match the pilot configuration.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Budget for locating the element; `None` uses the configured
    /// find timeout.
    pub timeout: Option<Duration>,
    /// Route the locate-and-read pair through the retry loop so the
    /// element going stale between location and read is absorbed.
    pub retry_on_stale: bool,
}

impl ReadOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit locate budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables stale-tolerant retry of the read itself.
    #[must_use]
    pub fn retrying(mut self) -> Self {
        self.retry_on_stale = true;
        self
    }
}

// ============================================================================
// Probes
// ============================================================================

/// Single attempt: first displayed element matching `selector`.
///
/// Free function (not a method) so retry closures can run it against a
/// cloned session handle without borrowing the pilot.
pub(crate) async fn displayed_match(
    remote: &dyn RemoteSession,
    selector: &Selector,
) -> Result<Option<ElementId>> {
    for id in remote.find_elements(selector).await? {
        if remote.is_displayed(&id).await? {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

// ============================================================================
// Pilot - Finders
// ============================================================================

impl Pilot {
    /// Finds a visible element, polling up to the configured timeout.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NotFound`] when no displayed match appears
    /// within the budget.
    pub async fn find_element(&self, selector: &Selector) -> Result<Element> {
        self.find_element_timeout(selector, self.config.find_timeout)
            .await
    }

    /// Finds a visible element with an explicit budget.
    pub async fn find_element_timeout(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<Element> {
        debug!(
            pilot = %self.uuid,
            selector = %selector,
            timeout_ms = timeout.as_millis() as u64,
            "Finding element"
        );
        self.ensure_focus().await?;

        let deadline = Deadline::after(self.clock.now(), timeout);
        loop {
            if let Ok(Some(id)) = displayed_match(self.remote.as_ref(), selector).await {
                return Ok(Element::new(
                    id,
                    selector.clone(),
                    Arc::clone(&self.remote),
                ));
            }
            if deadline.passed(self.clock.now()) {
                return Err(Error::not_found(
                    selector.to_string(),
                    timeout.as_millis() as u64,
                ));
            }
            self.clock.sleep(self.config.poll_interval).await;
        }
    }

    /// Finds every element matching `selector`, requiring at least one.
    ///
    /// Polls up to the configured timeout and returns the whole
    /// collection, not just the first match.
    pub async fn find_elements(&self, selector: &Selector) -> Result<Vec<Element>> {
        self.find_elements_timeout(selector, self.config.find_timeout)
            .await
    }

    /// Finds every matching element with an explicit budget.
    pub async fn find_elements_timeout(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<Vec<Element>> {
        debug!(
            pilot = %self.uuid,
            selector = %selector,
            timeout_ms = timeout.as_millis() as u64,
            "Finding elements"
        );
        self.ensure_focus().await?;

        let deadline = Deadline::after(self.clock.now(), timeout);
        loop {
            if let Ok(ids) = self.remote.find_elements(selector).await
                && !ids.is_empty()
            {
                return Ok(ids
                    .into_iter()
                    .map(|id| Element::new(id, selector.clone(), Arc::clone(&self.remote)))
                    .collect());
            }
            if deadline.passed(self.clock.now()) {
                return Err(Error::not_found(
                    selector.to_string(),
                    timeout.as_millis() as u64,
                ));
            }
            self.clock.sleep(self.config.poll_interval).await;
        }
    }

    /// Finds a visible element and clicks it.
    pub async fn click(&self, selector: &Selector) -> Result<()> {
        self.find_element(selector).await?.click().await
    }
}

// ============================================================================
// Pilot - Single-Shot Probes
// ============================================================================

impl Pilot {
    /// Single-shot existence probe; `false` on any lookup error.
    pub async fn exists(&self, selector: &Selector) -> bool {
        if self.ensure_focus().await.is_err() {
            return false;
        }
        self.probe_exists(selector).await
    }

    /// Single-shot visibility probe; `false` on any lookup error.
    pub async fn is_visible(&self, selector: &Selector) -> bool {
        if self.ensure_focus().await.is_err() {
            return false;
        }
        self.probe_visible(selector).await
    }

    /// Existence probe without re-asserting focus.
    pub(crate) async fn probe_exists(&self, selector: &Selector) -> bool {
        matches!(self.remote.find_elements(selector).await, Ok(ids) if !ids.is_empty())
    }

    /// Visibility probe without re-asserting focus.
    pub(crate) async fn probe_visible(&self, selector: &Selector) -> bool {
        matches!(
            displayed_match(self.remote.as_ref(), selector).await,
            Ok(Some(_))
        )
    }
}

// ============================================================================
// Pilot - Composite Waiters
// ============================================================================

impl Pilot {
    /// Waits for at least one element matching `selector` to exist.
    ///
    /// Returns whether the condition held when the wait ended; never
    /// errs on timeout.
    pub async fn wait_for_element_to_exist(&self, selector: &Selector, timeout: Duration) -> bool {
        self.wait_for(
            std::slice::from_ref(selector),
            Quantifier::All,
            false,
            true,
            timeout,
        )
        .await
    }

    /// Waits for every element matching `selector` to disappear.
    pub async fn wait_for_element_to_vanish(&self, selector: &Selector, timeout: Duration) -> bool {
        self.wait_for(
            std::slice::from_ref(selector),
            Quantifier::All,
            false,
            false,
            timeout,
        )
        .await
    }

    /// Waits for a displayed element matching `selector`.
    pub async fn wait_for_element_to_be_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> bool {
        self.wait_for(
            std::slice::from_ref(selector),
            Quantifier::All,
            true,
            true,
            timeout,
        )
        .await
    }

    /// Waits for no displayed element to match `selector`.
    pub async fn wait_for_element_to_be_invisible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> bool {
        self.wait_for(
            std::slice::from_ref(selector),
            Quantifier::All,
            true,
            false,
            timeout,
        )
        .await
    }

    /// Waits until any of `selectors` has an existing match.
    pub async fn wait_for_any_element_to_exist(
        &self,
        selectors: &[Selector],
        timeout: Duration,
    ) -> bool {
        self.wait_for(selectors, Quantifier::Any, false, true, timeout)
            .await
    }

    /// Waits until every one of `selectors` has a displayed match.
    pub async fn wait_for_all_elements_to_be_visible(
        &self,
        selectors: &[Selector],
        timeout: Duration,
    ) -> bool {
        self.wait_for(selectors, Quantifier::All, true, true, timeout)
            .await
    }

    /// Waits for existence with the indefinite budget.
    pub async fn wait_for_element_to_exist_indefinitely(&self, selector: &Selector) -> bool {
        self.wait_for_element_to_exist(selector, INDEFINITE_WAIT)
            .await
    }

    /// Waits for visibility with the indefinite budget.
    pub async fn wait_for_element_to_be_visible_indefinitely(&self, selector: &Selector) -> bool {
        self.wait_for_element_to_be_visible(selector, INDEFINITE_WAIT)
            .await
    }

    /// Shared wait loop: sample the quantified condition at the poll
    /// interval until it holds or the deadline passes.
    ///
    /// `require_visible` selects the visibility probe over the bare
    /// existence probe; `expect` sets the polarity (wait-for vs
    /// wait-for-disappearance).
    async fn wait_for(
        &self,
        selectors: &[Selector],
        quantifier: Quantifier,
        require_visible: bool,
        expect: bool,
        timeout: Duration,
    ) -> bool {
        debug!(
            pilot = %self.uuid,
            selectors = selectors.len(),
            ?quantifier,
            require_visible,
            expect,
            timeout_ms = timeout.as_millis() as u64,
            "Waiting for condition"
        );
        if self.ensure_focus().await.is_err() {
            return false;
        }

        let deadline = Deadline::after(self.clock.now(), timeout);
        loop {
            if self
                .condition_met(selectors, quantifier, require_visible, expect)
                .await
            {
                return true;
            }
            if deadline.passed(self.clock.now()) {
                return false;
            }
            self.clock.sleep(self.config.poll_interval).await;
        }
    }

    /// Evaluates the quantified condition once.
    async fn condition_met(
        &self,
        selectors: &[Selector],
        quantifier: Quantifier,
        require_visible: bool,
        expect: bool,
    ) -> bool {
        for selector in selectors {
            let observed = if require_visible {
                self.probe_visible(selector).await
            } else {
                self.probe_exists(selector).await
            };
            let holds = observed == expect;
            match quantifier {
                Quantifier::All if !holds => return false,
                Quantifier::Any if holds => return true,
                _ => {}
            }
        }
        matches!(quantifier, Quantifier::All)
    }
}

// ============================================================================
// Pilot - Property Reads
// ============================================================================

impl Pilot {
    /// Reads the visible text of the first displayed match.
    pub async fn text(&self, selector: &Selector, options: ReadOptions) -> Result<String> {
        let timeout = options.timeout.unwrap_or(self.config.find_timeout);
        if !options.retry_on_stale {
            return self
                .find_element_timeout(selector, timeout)
                .await?
                .text()
                .await;
        }

        self.ensure_focus().await?;
        let remote = Arc::clone(&self.remote);
        let sel = selector.clone();
        retry_until_some(
            self.clock.as_ref(),
            self.config.poll_interval,
            timeout,
            &format!("text of {selector}"),
            move || {
                let remote = Arc::clone(&remote);
                let sel = sel.clone();
                async move {
                    match displayed_match(remote.as_ref(), &sel).await? {
                        Some(id) => Ok(Some(remote.text(&id).await?)),
                        None => Ok(None),
                    }
                }
            },
        )
        .await
    }

    /// Reads an attribute of the first displayed match.
    ///
    /// `Ok(None)` means the element was found but carries no such
    /// attribute.
    pub async fn attribute(
        &self,
        selector: &Selector,
        name: &str,
        options: ReadOptions,
    ) -> Result<Option<String>> {
        let timeout = options.timeout.unwrap_or(self.config.find_timeout);
        if !options.retry_on_stale {
            return self
                .find_element_timeout(selector, timeout)
                .await?
                .attribute(name)
                .await;
        }

        self.ensure_focus().await?;
        let remote = Arc::clone(&self.remote);
        let sel = selector.clone();
        let name = name.to_string();
        retry_until_some(
            self.clock.as_ref(),
            self.config.poll_interval,
            timeout,
            &format!("attribute {name} of {selector}"),
            move || {
                let remote = Arc::clone(&remote);
                let sel = sel.clone();
                let name = name.clone();
                async move {
                    match displayed_match(remote.as_ref(), &sel).await? {
                        Some(id) => Ok(Some(remote.attribute(&id, &name).await?)),
                        None => Ok(None),
                    }
                }
            },
        )
        .await
    }

    /// Reads the CSS classes of the first displayed match.
    pub async fn classes(&self, selector: &Selector, options: ReadOptions) -> Result<Vec<String>> {
        let class_attr = self.attribute(selector, "class", options).await?;
        Ok(class_attr
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    /// Reads the hyperlink target of the first displayed match.
    pub async fn hyperlink(
        &self,
        selector: &Selector,
        options: ReadOptions,
    ) -> Result<Option<String>> {
        self.attribute(selector, "href", options).await
    }

    /// Reads the form value of the first displayed match.
    pub async fn value(
        &self,
        selector: &Selector,
        options: ReadOptions,
    ) -> Result<Option<String>> {
        self.attribute(selector, "value", options).await
    }
}
