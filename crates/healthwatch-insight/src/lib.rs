//! Caregiver insight generation.
//!
//! Turns a vitals snapshot into a short plain-language paragraph for the
//! caregiver via an OpenAI-compatible chat-completions endpoint. The prompt
//! carries qualitative descriptors, never raw numbers, and the tone follows
//! the stability score. An empty completion falls back to deterministic
//! rule-based text; transport failures surface as typed errors.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::InsightClient;
pub use error::InsightError;
pub use prompt::{build_prompt, fallback_insight};
