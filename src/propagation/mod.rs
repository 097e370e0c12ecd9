pub mod carrier;

pub use carrier::{TextMapCarrier, TraceContext, SPAN_ID_KEY, TRACE_ID_KEY};
