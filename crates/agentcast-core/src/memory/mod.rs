//! Per-session conversation memory shared by all agents.

pub mod history;

pub use history::ConversationMemory;
