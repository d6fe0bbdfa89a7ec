#![allow(clippy::unwrap_used, clippy::expect_used)]

use gitbench_core::errors::BenchError;
use gitbench_core::logging_facility::test_capture::init_test_capture;
use gitbench_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT};
use gitbench_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, ops = 12);

    let start_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert_eq!(start_events.len(), 1);
    assert_eq!(start_events[0].fields.get("ops"), Some(&"12".to_string()));
    assert!(start_events[0].field(FIELD_COMPONENT).is_some());
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get("duration_ms"),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = BenchError::NoRowsToUpdate { table: 0 };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    let fields = &error_events[0].fields;
    assert_eq!(fields.get("err_kind"), Some(&"NoRowsToUpdate".to_string()));
    assert_eq!(
        fields.get("err_code"),
        Some(&"ERR_NO_ROWS_TO_UPDATE".to_string())
    );

    let message = error_events[0].message.as_deref().unwrap();
    assert!(message.contains("ERR_NO_ROWS_TO_UPDATE"), "{}", message);

    // The error is still usable after logging
    assert_eq!(err, BenchError::NoRowsToUpdate { table: 0 });
}

#[test]
fn test_assert_event_exists_helper() {
    let capture = init_test_capture();
    log_op_start!("test_assert_helper_unique_4");
    capture.assert_event_exists("test_assert_helper_unique_4", EVENT_START);
}

#[test]
fn test_log_op_error_with_extra_fields_keeps_message() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_fields_unique_5";

    let err = BenchError::TooFewFields {
        fields: 2,
        required: 3,
    };
    log_op_error!(op_name, err, duration_ms = 7, run_id = "run-5",);

    let errors = capture.error_events(op_name);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].run_id.as_deref(), Some("run-5"));
    assert_eq!(errors[0].err_code(), Some("ERR_INVALID_CONFIG"));
    let message = errors[0].message.as_deref().unwrap();
    assert!(message.contains("ERR_INVALID_CONFIG"), "{}", message);
    assert!(
        message.contains("tables need at least 3 fields, got 2"),
        "{}",
        message
    );
}
