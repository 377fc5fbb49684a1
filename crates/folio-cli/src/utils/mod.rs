//! # Utility Functions and Helpers
//!
//! - [`logging`]: tracing subscriber and color control
//! - [`settings`]: configuration loading and index source resolution

pub mod logging;
pub mod settings;
