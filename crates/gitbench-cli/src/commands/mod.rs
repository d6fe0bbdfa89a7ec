pub mod commit;
pub mod common;
pub mod dump;
pub mod timed;
