//! Canonical names for structured log events
//!
//! The logging macros emit fields under these names; the test capture
//! layer reads them back by the same names.

// Fields every event carries
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_MESSAGE: &str = "message";

// Run correlation
pub const FIELD_RUN_ID: &str = "run_id";

// Set on `end_error` events
pub const FIELD_ERR_CODE: &str = "err_code";

// Values of the `event` field
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
