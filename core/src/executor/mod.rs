//! Bounded concurrency over a collection of keys.
//!
//! All calls are futures polled on the caller's task; nothing is spawned, so
//! "concurrent" means several outstanding requests, not parallel threads.

mod scheduler;

pub use scheduler::{execute_bounded, DEFAULT_MAX_CONCURRENCY};
