// Fri Jan 16 2026 - Alex

//! Evaluates JavaScript in an embedded QuickJS session and converts the
//! results into host [`Variant`] values.

pub mod config;
pub mod scripting;
pub mod ui;
pub mod utils;

pub use config::{BridgeConfig, ConfigError, SessionConfig};
pub use scripting::{BridgeError, Session, SessionError, ValueBridge, Variant};
