// Fri Jan 16 2026 - Alex

pub mod bridge;
pub mod engine;
pub mod error;
pub mod variant;

pub use bridge::{KeyListing, StringForm, ValueBridge};
pub use engine::{Session, EVAL_SOURCE_NAME};
pub use error::{BridgeError, BridgeResult, SessionError, SessionResult, UNKNOWN_ERROR};
pub use variant::Variant;
