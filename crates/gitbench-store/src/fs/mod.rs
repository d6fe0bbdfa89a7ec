//! Filesystem helpers: atomic writes and the timings file

mod atomic;
mod timings;

pub use atomic::atomic_write;
pub use timings::write_timings;
