//! Generic "retry until a value appears or the deadline passes" loop.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

use super::clock::{Clock, Deadline};

// ============================================================================
// retry_until_some
// ============================================================================

/// Polls `action` until it yields a value or `timeout` elapses.
///
/// Semantics:
///
/// - `action` is invoked at least once, immediately.
/// - `Ok(Some(value))` returns `value` without any further delay.
/// - `Ok(None)` and `Err(_)` both count as "not yet": the loop sleeps
///   one `interval` and tries again, unless the deadline has passed.
/// - Past the deadline, the *triggering failure* propagates: the last
///   raw error when the final attempt erred, so root-cause diagnostics
///   survive, or a synthesized [`Error::Timeout`] naming `operation`
///   when the final attempt merely produced nothing.
///
/// The closure owns its captures (clone `Arc` handles in), because the
/// returned future must be `'static` with respect to the closure body.
pub async fn retry_until_some<T, F, Fut>(
    clock: &dyn Clock,
    interval: Duration,
    timeout: Duration,
    operation: &str,
    mut action: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Deadline::after(clock.now(), timeout);

    loop {
        match action().await {
            Ok(Some(value)) => return Ok(value),
            outcome => {
                if deadline.passed(clock.now()) {
                    return match outcome {
                        Err(error) => Err(error),
                        _ => Err(Error::timeout(operation, timeout.as_millis() as u64)),
                    };
                }
                if let Err(error) = outcome {
                    debug!(operation, error = %error, "Attempt failed, retrying");
                }
            }
        }
        clock.sleep(interval).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
