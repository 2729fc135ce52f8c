//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of a
//! cache engine.
//!
//! # Tasks
//! - TTL Sweep: Removes expired LFU entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
