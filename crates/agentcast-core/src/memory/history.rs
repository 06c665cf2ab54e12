//! In-process conversation history keyed by agent and identity.
//!
//! Each agent remembers the last `max_runs` exchanges it had with a given
//! identity (the client's `session_id`) and replays them as context on the
//! next call. Concurrent sessions touch different keys most of the time, so
//! a `DashMap` shard lock is the only synchronisation.
//!
//! Identities are client-chosen, so the number of tracked (agent, identity)
//! threads is capped; recording a new thread at the cap evicts the one
//! written least recently.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use agentcast_types::llm::Message;

/// One completed query/answer pair.
#[derive(Debug, Clone)]
struct Exchange {
    query: String,
    answer: String,
}

/// Default cap on tracked (agent, identity) threads.
pub const DEFAULT_MAX_THREADS: usize = 1024;

#[derive(Debug, Default)]
struct Thread {
    exchanges: VecDeque<Exchange>,
    last_write: u64,
}

/// Bounded per-(agent, identity) history.
pub struct ConversationMemory {
    max_runs: usize,
    max_threads: usize,
    clock: AtomicU64,
    histories: DashMap<(String, String), Thread>,
}

impl ConversationMemory {
    /// `max_runs == 0` disables history entirely.
    pub fn new(max_runs: usize) -> Self {
        Self::with_max_threads(max_runs, DEFAULT_MAX_THREADS)
    }

    /// Like [`ConversationMemory::new`] with an explicit thread cap
    /// (clamped to at least one).
    pub fn with_max_threads(max_runs: usize, max_threads: usize) -> Self {
        Self {
            max_runs,
            max_threads: max_threads.max(1),
            clock: AtomicU64::new(0),
            histories: DashMap::new(),
        }
    }

    /// Past exchanges for `(agent, identity)` as alternating user/assistant
    /// messages, oldest first.
    pub fn history(&self, agent: &str, identity: &str) -> Vec<Message> {
        let key = (agent.to_string(), identity.to_string());
        self.histories
            .get(&key)
            .map(|entry| {
                entry
                    .exchanges
                    .iter()
                    .flat_map(|ex| [Message::user(&ex.query), Message::assistant(&ex.answer)])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append an exchange, evicting the oldest beyond `max_runs`.
    pub fn record(&self, agent: &str, identity: &str, query: &str, answer: &str) {
        if self.max_runs == 0 {
            return;
        }

        let key = (agent.to_string(), identity.to_string());
        let tick = self.clock.fetch_add(1, Ordering::Relaxed);
        if !self.histories.contains_key(&key) && self.histories.len() >= self.max_threads {
            self.evict_least_recent();
        }

        let mut entry = self.histories.entry(key).or_default();
        entry.last_write = tick;
        entry.exchanges.push_back(Exchange {
            query: query.to_string(),
            answer: answer.to_string(),
        });
        while entry.exchanges.len() > self.max_runs {
            entry.exchanges.pop_front();
        }
    }

    /// Number of (agent, identity) threads currently held.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    fn evict_least_recent(&self) {
        let oldest = self
            .histories
            .iter()
            .min_by_key(|entry| entry.last_write)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            self.histories.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcast_types::llm::MessageRole;

    #[test]
    fn test_empty_history() {
        let memory = ConversationMemory::new(5);
        assert!(memory.history("GeneralAssistant", "default").is_empty());
    }

    #[test]
    fn test_record_and_replay() {
        let memory = ConversationMemory::new(5);
        memory.record("GeneralAssistant", "u1", "hi", "hello there");

        let history = memory.history("GeneralAssistant", "u1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "hi");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, "hello there");
    }

    #[test]
    fn test_history_is_scoped_by_agent_and_identity() {
        let memory = ConversationMemory::new(5);
        memory.record("ResearchAgent", "u1", "q", "a");

        assert!(memory.history("ResearchAgent", "u2").is_empty());
        assert!(memory.history("AnalysisAgent", "u1").is_empty());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_oldest_exchange_evicted() {
        let memory = ConversationMemory::new(2);
        memory.record("a", "u", "q1", "a1");
        memory.record("a", "u", "q2", "a2");
        memory.record("a", "u", "q3", "a3");

        let history = memory.history("a", "u");
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "q2");
        assert_eq!(history[3].content, "a3");
    }

    #[test]
    fn test_thread_cap_evicts_least_recently_written() {
        let memory = ConversationMemory::with_max_threads(5, 2);
        memory.record("a", "u1", "q1", "a1");
        memory.record("a", "u2", "q2", "a2");
        memory.record("a", "u1", "q3", "a3");
        memory.record("a", "u3", "q4", "a4");

        assert_eq!(memory.len(), 2);
        assert!(memory.history("a", "u2").is_empty());
        assert_eq!(memory.history("a", "u1").len(), 4);
        assert_eq!(memory.history("a", "u3").len(), 2);
    }

    #[test]
    fn test_many_identities_stay_bounded() {
        let memory = ConversationMemory::with_max_threads(1, 8);
        for i in 0..100 {
            memory.record("a", &format!("session-{i}"), "q", "a");
        }
        assert_eq!(memory.len(), 8);
        assert_eq!(memory.history("a", "session-99").len(), 2);
        assert!(memory.history("a", "session-0").is_empty());
    }

    #[test]
    fn test_zero_runs_disables_history() {
        let memory = ConversationMemory::new(0);
        memory.record("a", "u", "q", "a");
        assert!(memory.history("a", "u").is_empty());
    }
}
