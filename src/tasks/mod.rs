//! Background Tasks Module
//!
//! Tasks owned by the server process.
//!
//! # Tasks
//! - Cache cleanup: prunes expired match and banner entries on an interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
