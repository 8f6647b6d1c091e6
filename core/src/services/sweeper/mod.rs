//! Background eviction of expired verification codes
//!
//! The sweeper owns no records itself. It holds a handle to the shared store
//! and periodically asks it to drop everything that has expired.

mod service;


pub use service::{CodeSweeper, SweepResult, SweeperHandle};
