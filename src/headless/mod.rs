//! In-memory engine and host used by tests and headless embedding.
//!
//! The engine records every call and keeps per-handle state the way a real
//! charting engine does, so lifecycle behavior can be checked without a
//! browser.

mod container;
mod engine;
mod handle;
mod host;

pub use container::HeadlessContainer;
use container::WeakContainer;
pub use engine::{EngineCall, HeadlessEngine, Settlement};
pub use handle::HeadlessHandle;
pub use host::HeadlessHost;
