//! Poll-until-terminal-state primitive
//!
//! Some operations complete asynchronously on the server; the client can
//! only observe progress by re-reading the resource and inspecting its
//! status. [`poll_until`] implements that loop once: an initial delay, a
//! probe at a fixed interval, and an overall deadline. The probe decides
//! whether the resource is still pending, has reached its target state, or
//! has failed terminally. A probe error aborts the wait immediately; a
//! single failed read is not retried.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Timing of a wait operation
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Pause before the first probe; newly accepted operations are rarely
    /// observable sooner
    pub initial_delay: Duration,
    /// Pause between probes
    pub poll_interval: Duration,
    /// Overall deadline measured from the start of the wait
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(30),
            poll_interval: Duration::from_secs(60),
            timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Outcome of one probe
pub(crate) enum Poll<T> {
    /// Not yet in a terminal state; keep polling
    Pending,
    /// Reached the target state
    Done(T),
}

/// Runs `probe` at `options.poll_interval` until it reports a terminal
/// outcome or the overall timeout elapses
///
/// `resource` names the awaited resource in timeout errors and logs.
pub(crate) async fn poll_until<T, F, Fut>(
    resource: &str,
    options: &WaitOptions,
    mut probe: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Poll<T>>>,
{
    let deadline = Instant::now() + options.timeout;
    tokio::time::sleep(options.initial_delay).await;

    loop {
        match probe().await? {
            Poll::Done(value) => return Ok(value),
            Poll::Pending => debug!(resource, "still pending"),
        }

        if Instant::now() + options.poll_interval > deadline {
            return Err(ClientError::WaitTimeout {
                resource: resource.to_string(),
                waited: options.timeout,
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_options() -> WaitOptions {
        WaitOptions {
            initial_delay: Duration::from_millis(1),
            poll_interval: Duration::from_millis(1),
            timeout: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_default_options() {
        let options = WaitOptions::default();
        assert_eq!(options.initial_delay, Duration::from_secs(30));
        assert_eq!(options.poll_interval, Duration::from_secs(60));
        assert_eq!(options.timeout, Duration::from_secs(1800));
    }

    #[tokio::test]
    async fn test_done_after_pending_probes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let value = poll_until("test resource", &fast_options(), move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Ok(Poll::Pending)
                } else {
                    Ok(Poll::Done("ready"))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, "ready");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_probe_error_aborts_immediately() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<()> = poll_until("test resource", &fast_options(), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::api_error(500, "backend exploded"))
            }
        })
        .await;

        assert!(matches!(result, Err(ClientError::ApiError { status: 500, .. })));
        // a single failed probe ends the wait, no retry
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_when_never_terminal() {
        let result: Result<()> =
            poll_until("assignment a1", &fast_options(), || async { Ok(Poll::Pending) }).await;

        match result {
            Err(ClientError::WaitTimeout { resource, waited }) => {
                assert_eq!(resource, "assignment a1");
                assert_eq!(waited, Duration::from_millis(250));
            }
            other => panic!("expected WaitTimeout, got {:?}", other),
        }
    }
}
