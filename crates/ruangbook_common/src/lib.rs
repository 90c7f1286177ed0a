// --- File: crates/ruangbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod clock; // Time source abstraction
pub mod error; // Error handling
pub mod http; // HTTP error mapping
pub mod logging; // Logging utilities
pub mod models; // Domain model shared by every crate
pub mod services; // Storage abstractions

// Re-export error types and utilities for easier access
pub use error::{FieldError, HttpStatusCode, RuangbookError};

// Re-export HTTP utilities for easier access
pub use http::{ApiJson, ApiQuery, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level};

pub use clock::{Clock, FixedClock, SystemClock};
