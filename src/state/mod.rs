//! State management for harvest runs
//!
//! This module contains:
//! - Crawl phase definitions and stop reasons
//! - The per-run crawl state owned by the orchestrator

mod crawl_state;
mod phase;

pub use crawl_state::CrawlState;
pub use phase::{CrawlPhase, StopReason};
