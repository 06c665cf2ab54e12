//! Moves blocking agent calls off the async runtime.
//!
//! [`AgentDispatcher::invoke`] runs [`Agent::run`] on tokio's blocking pool
//! and awaits it, so the session task stays free to notice a client
//! disconnect while the agent works. A semaphore bounds how many agent
//! calls run at once; an optional deadline turns a stuck call into an
//! error instead of an open-ended wait.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{Instrument, debug, info_span, warn};

use agentcast_types::agent::AgentResponse;
use agentcast_types::error::DispatchError;

use crate::agent::AgentHandle;

/// Text streamed when an agent finishes without content.
pub const NO_RESPONSE_TEXT: &str = "No response generated";

/// Bounded, deadline-aware executor for agent invocations.
#[derive(Debug, Clone)]
pub struct AgentDispatcher {
    permits: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl AgentDispatcher {
    /// `max_concurrent` is clamped to at least one.
    pub fn new(max_concurrent: usize, timeout: Option<Duration>) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            timeout,
        }
    }

    /// Deadline in seconds, `0` meaning none.
    pub fn from_secs(max_concurrent: usize, timeout_secs: u64) -> Self {
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        Self::new(max_concurrent, timeout)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `agent` on the blocking pool and wait for its answer.
    ///
    /// The permit is released only once the blocking call itself returns,
    /// even when the caller stops waiting because of the deadline or a
    /// dropped future.
    pub async fn invoke(
        &self,
        agent: AgentHandle,
        query: String,
        identity: String,
    ) -> Result<AgentResponse, DispatchError> {
        let span = info_span!("agent.run", agent = agent.name(), identity = %identity);

        async {
            let permit = self
                .permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| DispatchError::Cancelled)?;

            let run_span = tracing::Span::current();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let _entered = run_span.enter();
                agent.run(&query, &identity)
            });

            let joined = match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        warn!(timeout = ?limit, "agent invocation timed out");
                        return Err(DispatchError::TimedOut(limit));
                    }
                },
                None => handle.await,
            };

            match joined {
                Ok(result) => {
                    debug!(ok = result.is_ok(), "agent invocation finished");
                    result.map_err(DispatchError::from)
                }
                Err(e) if e.is_panic() => {
                    let message = panic_message(e.into_panic());
                    warn!(panic = %message, "agent panicked");
                    Err(DispatchError::Panicked(message))
                }
                Err(_) => Err(DispatchError::Cancelled),
            }
        }
        .instrument(span)
        .await
    }

    /// Invoke and fold every outcome into the text that gets streamed.
    ///
    /// Failures become `"Error: {message}"` and an empty answer becomes
    /// [`NO_RESPONSE_TEXT`]; this never fails.
    pub async fn invoke_to_text(&self, agent: AgentHandle, query: String, identity: String) -> String {
        match self.invoke(agent, query, identity).await {
            Ok(AgentResponse { content: Some(text) }) => text,
            Ok(AgentResponse { content: None }) => NO_RESPONSE_TEXT.to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use agentcast_types::error::AgentError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted(fn(&str) -> Result<AgentResponse, AgentError>);

    impl Agent for Scripted {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn run(&self, query: &str, _identity: &str) -> Result<AgentResponse, AgentError> {
            (self.0)(query)
        }
    }

    fn agent(f: fn(&str) -> Result<AgentResponse, AgentError>) -> AgentHandle {
        Arc::new(Scripted(f))
    }

    async fn text(dispatcher: &AgentDispatcher, agent: AgentHandle) -> String {
        dispatcher
            .invoke_to_text(agent, "q".to_string(), "u".to_string())
            .await
    }

    #[tokio::test]
    async fn test_successful_run() {
        let dispatcher = AgentDispatcher::new(2, None);
        let out = text(&dispatcher, agent(|q| Ok(AgentResponse::text(format!("echo {q}"))))).await;
        assert_eq!(out, "echo q");
        assert_eq!(dispatcher.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_empty_response_text() {
        let dispatcher = AgentDispatcher::new(1, None);
        let out = text(&dispatcher, agent(|_| Ok(AgentResponse::empty()))).await;
        assert_eq!(out, NO_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn test_agent_error_text() {
        let dispatcher = AgentDispatcher::new(1, None);
        let out = text(&dispatcher, agent(|_| Err(AgentError::Model("boom".to_string())))).await;
        assert_eq!(out, "Error: boom");
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let dispatcher = AgentDispatcher::new(1, None);
        let err = dispatcher
            .invoke(agent(|_| panic!("kaboom")), "q".to_string(), "u".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Panicked(ref m) if m == "kaboom"));
        assert_eq!(dispatcher.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_timeout() {
        let dispatcher = AgentDispatcher::new(1, Some(Duration::from_millis(20)));
        let err = dispatcher
            .invoke(
                agent(|_| {
                    std::thread::sleep(Duration::from_millis(300));
                    Ok(AgentResponse::text("late"))
                }),
                "q".to_string(),
                "u".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::TimedOut(_)));
        assert_eq!(err.to_string(), "agent invocation timed out after 20ms");

        let out = text(&dispatcher, agent(|_| Ok(AgentResponse::text("late")))).await;
        assert_eq!(out, "late");
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        assert!(AgentDispatcher::from_secs(4, 0).timeout().is_none());
        assert_eq!(
            AgentDispatcher::from_secs(4, 30).timeout(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(AgentDispatcher::new(0, None).available_permits(), 1);
    }

    static RUNNING: AtomicUsize = AtomicUsize::new(0);
    static PEAK: AtomicUsize = AtomicUsize::new(0);

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrency_is_bounded() {
        let dispatcher = AgentDispatcher::new(2, None);
        let slow = agent(|_| {
            let now = RUNNING.fetch_add(1, Ordering::SeqCst) + 1;
            PEAK.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(50));
            RUNNING.fetch_sub(1, Ordering::SeqCst);
            Ok(AgentResponse::text("ok"))
        });

        let calls = (0..6).map(|i| {
            dispatcher.invoke_to_text(slow.clone(), format!("q{i}"), "u".to_string())
        });
        let results = futures_util::future::join_all(calls).await;

        assert!(results.iter().all(|r| r == "ok"));
        assert!(PEAK.load(Ordering::SeqCst) <= 2);
    }
}
