//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (score timestamps)
//! - Driving the two tick cadences over one shared session
//! - Storage selection (files natively, LocalStorage on web)

pub mod clock;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{Session, SharedSession};
