//! In-memory event capture for log assertions in tests
//!
//! `init_test_capture()` installs a global subscriber whose only layer
//! records every event. All tests in one binary share that buffer, so
//! assertions should select their own events by op name or by `run_id`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::types::schema::{
    EVENT_END_ERROR, FIELD_ERR_CODE, FIELD_EVENT, FIELD_MESSAGE, FIELD_OP, FIELD_RUN_ID,
};

/// One recorded event; every field value is kept in its display form
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub run_id: Option<String>,
    pub message: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: HashMap<String, String>) -> Self {
        Self {
            level,
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            run_id: fields.get(FIELD_RUN_ID).cloned(),
            message: fields.get(FIELD_MESSAGE).cloned(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether this is the `event` phase of `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }
}

#[derive(Default)]
struct FieldCollector(HashMap<String, String>);

impl Visit for FieldCollector {
    // Integers and bools arrive here too; their Debug form is their display form
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct CaptureLayer {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), collector.0);
        if let Ok(mut sink) = self.sink.lock() {
            sink.push(captured);
        }
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything captured so far, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn filtered(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op.as_deref() == Some(op))
    }

    /// Events of `op` that carry `run_id`, in emission order
    ///
    /// Runs executing concurrently in other tests are filtered out.
    pub fn run_events(&self, op: &str, run_id: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op.as_deref() == Some(op) && e.run_id.as_deref() == Some(run_id))
    }

    /// `end_error` events of `op`
    pub fn error_events(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.is(op, EVENT_END_ERROR))
    }

    /// # Panics
    ///
    /// Panics if no `event` phase of `op` was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {} event for op {} among {} captured events",
            event,
            op,
            events.len()
        );
    }

    pub fn count_events(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber (first call only) and return its handle
///
/// # Example
///
/// ```
/// use gitbench_core::log_op_start;
/// use gitbench_core::logging_facility::test_capture::init_test_capture;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example");
/// capture.assert_event_exists("doc_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let sink = Arc::new(Mutex::new(Vec::new()));
            tracing_subscriber::registry()
                .with(CaptureLayer { sink: sink.clone() })
                .init();
            TestCapture { sink }
        })
        .clone()
}
