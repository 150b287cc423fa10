//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: optionally drops expired entries nobody has read

mod sweep;

pub use sweep::spawn_sweep_task;
