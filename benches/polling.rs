//! Polling-engine benchmark suite.
//!
//! Measures the per-call overhead of the element waiter when the target
//! is present on the first probe, across collection sizes.
//!
//! Run with: cargo bench --bench polling
//! Results saved to: target/criterion/

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::Value;
use tokio::runtime::Runtime;

use dom_pilot::{
    ElementId, Pilot, PilotConfig, RemoteSession, Result, Selector, TabHandle,
};

// ============================================================================
// In-memory session stub
// ============================================================================

/// Session whose lookups always succeed immediately, so the bench
/// isolates waiter overhead from remote latency.
struct AlwaysPresent {
    elements: Vec<ElementId>,
}

impl AlwaysPresent {
    fn with_elements(count: usize) -> Arc<Self> {
        Arc::new(Self {
            elements: (0..count).map(|i| ElementId::new(format!("el-{i}"))).collect(),
        })
    }
}

#[async_trait]
impl RemoteSession for AlwaysPresent {
    async fn find_elements(&self, _selector: &Selector) -> Result<Vec<ElementId>> {
        Ok(self.elements.clone())
    }

    async fn find_elements_within(
        &self,
        _parent: &ElementId,
        _selector: &Selector,
    ) -> Result<Vec<ElementId>> {
        Ok(self.elements.clone())
    }

    async fn is_displayed(&self, _element: &ElementId) -> Result<bool> {
        Ok(true)
    }

    async fn is_selected(&self, _element: &ElementId) -> Result<bool> {
        Ok(false)
    }

    async fn attribute(&self, _element: &ElementId, _name: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn text(&self, _element: &ElementId) -> Result<String> {
        Ok(String::new())
    }

    async fn click(&self, _element: &ElementId) -> Result<()> {
        Ok(())
    }

    async fn send_keys(&self, _element: &ElementId, _keys: &str) -> Result<()> {
        Ok(())
    }

    async fn clear(&self, _element: &ElementId) -> Result<()> {
        Ok(())
    }

    async fn navigate(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok("about:blank".to_string())
    }

    async fn refresh(&self) -> Result<()> {
        Ok(())
    }

    async fn execute_script(&self, _script: &str, _args: &[Value]) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn window_handles(&self) -> Result<Vec<TabHandle>> {
        Ok(vec![TabHandle::new("root")])
    }

    async fn switch_to_window(&self, _handle: &TabHandle) -> Result<()> {
        Ok(())
    }

    async fn close_window(&self) -> Result<()> {
        Ok(())
    }

    async fn alert_text(&self) -> Result<String> {
        Ok(String::new())
    }

    async fn accept_alert(&self) -> Result<()> {
        Ok(())
    }

    async fn dismiss_alert(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Benchmark Parameters
// ============================================================================

const ELEMENT_COUNTS: &[usize] = &[1, 10, 100];

// ============================================================================
// Benchmark: First-probe find
// ============================================================================

fn bench_find_element(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("find_element");
    group.measurement_time(Duration::from_secs(10));

    for &count in ELEMENT_COUNTS {
        let pilot = Pilot::with_config(AlwaysPresent::with_elements(count), PilotConfig::new());
        let selector = Selector::css(".card");
        group.bench_with_input(BenchmarkId::new("present", count), &count, |b, _| {
            b.to_async(&rt).iter(|| async {
                pilot.find_element(&selector).await.unwrap();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Single-shot existence probe
// ============================================================================

fn bench_exists(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("exists");

    for &count in ELEMENT_COUNTS {
        let pilot = Pilot::with_config(AlwaysPresent::with_elements(count), PilotConfig::new());
        let selector = Selector::css(".card");
        group.bench_with_input(BenchmarkId::new("probe", count), &count, |b, _| {
            b.to_async(&rt).iter(|| async {
                assert!(pilot.exists(&selector).await);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_element, bench_exists);
criterion_main!(benches);
