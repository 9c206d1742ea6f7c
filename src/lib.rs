//! Baggage Check
//!
//! CLI-side pieces around the shared core: configuration, file-backed
//! storage, photo encoding, the AI classifier and terminal output.

pub mod ai_provider;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod photo;
pub mod render;
pub mod storage;

pub use baggage_check_common as common;
