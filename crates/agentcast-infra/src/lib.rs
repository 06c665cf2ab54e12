//! Infrastructure layer for agentcast.
//!
//! Contains implementations of the ports defined in `agentcast-core`: the
//! AWS Bedrock and echo model providers, the local artifact directory, and
//! the configuration loader.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod storage;
