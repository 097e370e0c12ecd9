use crate::table::Table;

/// Header key carrying the trace identifier.
pub const TRACE_ID_KEY: &str = "trace-id";
/// Header key carrying the span identifier.
pub const SPAN_ID_KEY: &str = "span-id";

/// String-keyed view used by trace propagation.
pub trait TextMapCarrier {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String);
    fn keys(&self) -> Vec<String>;
}

impl TextMapCarrier for Table {
    // Non-string values are invisible to propagation.
    fn get(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(|v| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        Table::set(self, key, value);
    }

    fn keys(&self) -> Vec<String> {
        Table::keys(self)
    }
}

/// Trace and span identifiers carried alongside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

impl TraceContext {
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
        }
    }

    pub fn inject<C: TextMapCarrier + ?Sized>(&self, carrier: &mut C) {
        carrier.set(TRACE_ID_KEY, self.trace_id.clone());
        carrier.set(SPAN_ID_KEY, self.span_id.clone());
    }

    /// Both identifiers must be present and non-empty.
    pub fn extract<C: TextMapCarrier + ?Sized>(carrier: &C) -> Option<Self> {
        let trace_id = carrier.get(TRACE_ID_KEY).filter(|s| !s.is_empty())?;
        let span_id = carrier.get(SPAN_ID_KEY).filter(|s| !s.is_empty())?;
        Some(Self::new(trace_id, span_id))
    }
}
