//! Tern Liveness
//!
//! Per-cell time-to-live: turn a requested TTL and write time into an
//! expiration, and decide whether a cell is visible at a given instant.
//!
//! - `ttl` - TTL and write-time clause validation, expiration arithmetic
//! - `clock` - wall-clock sources (system and manual)
//! - `error` - Error types for rejected clauses

mod clock;
mod error;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LivenessError, LivenessResult};
pub use ttl::{is_live, LivenessEngine, RequestedTtl};
