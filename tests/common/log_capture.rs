#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

/// Captures tracing events on the current thread for verification.
pub struct TestLogCapture {
    logs: Arc<Mutex<Vec<CapturedLog>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

#[derive(Debug, Clone)]
pub struct CapturedLog {
    pub level: tracing::Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl TestLogCapture {
    /// Start capturing. Capture stops when the value is dropped.
    pub fn start() -> Self {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let layer = CaptureLayer { logs: logs.clone() };
        let subscriber = tracing_subscriber::registry().with(layer);
        let guard = tracing::subscriber::set_default(subscriber);

        Self {
            logs,
            _guard: guard,
        }
    }

    /// Assert a message was logged at `level` containing `needle`.
    pub fn assert_logged_at_level(&self, level: tracing::Level, needle: &str) {
        let logs = self.logs.lock().unwrap();
        let found = logs
            .iter()
            .any(|l| l.level == level && l.message.contains(needle));
        assert!(
            found,
            "Expected {} log containing '{}'. Logged: {:#?}",
            level,
            needle,
            logs.iter().map(|l| (&l.level, &l.message)).collect::<Vec<_>>()
        );
    }

    /// Assert a structured field was logged.
    pub fn assert_field_logged(&self, field_name: &str, field_value: &str) {
        let logs = self.logs.lock().unwrap();
        let found = logs.iter().any(|l| {
            l.fields
                .iter()
                .any(|(k, v)| k == field_name && v.contains(field_value))
        });
        assert!(
            found,
            "Expected field {}={}. Logged fields: {:#?}",
            field_name,
            field_value,
            logs.iter().map(|l| &l.fields).collect::<Vec<_>>()
        );
    }

    /// Count events at `level`.
    pub fn count_at_level(&self, level: tracing::Level) -> usize {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.level == level)
            .count()
    }
}

struct CaptureLayer {
    logs: Arc<Mutex<Vec<CapturedLog>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.logs.lock().unwrap().push(CapturedLog {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}
