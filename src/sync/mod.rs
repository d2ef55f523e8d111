//! Per-target sync engine
//!
//! Decides between the clone path (fresh target) and the update path
//! (existing working copy), classifies the result and triggers the optional
//! post-update action.
//!
//! ## Structure
//!
//! - `options` - Engine configuration (`SyncOptions`)
//! - `result` - Outcome types (`SyncReport`, `SyncOutcome`, `ActionOutcome`)
//! - `engine` - The state machine itself (`SyncEngine`)

mod engine;
mod options;
mod result;

pub use engine::SyncEngine;
pub use options::SyncOptions;
pub use result::{ActionOutcome, SyncOutcome, SyncPath, SyncReport};
