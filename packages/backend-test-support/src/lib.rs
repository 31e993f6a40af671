//! Backend test support utilities
//!
//! Shared helpers for the tarot backend integration tests: one-time logging
//! initialization and assertions over the problem-details error contract.

pub mod logging;
pub mod problem_details;
