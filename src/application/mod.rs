//! Application layer - Use cases and port interfaces
//!
//! Contains the request handlers, the preferences service and the trait
//! definitions for external system interactions.

pub mod handlers;
pub mod ports;
pub mod preferences;

// Re-export use cases
pub use handlers::{HandlerCallbacks, HandlerError, HandlerOutcome, RequestHandlers, SAVE_CANCELED};
pub use preferences::PreferencesService;
