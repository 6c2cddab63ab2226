//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → file exporter → OTLP JSON lines
//! ```
//!
//! Spans land in `marquee-otlp.json` under the plugin data directory. The file
//! rotates at 10 MB and keeps three backups. The level comes from the
//! `trace_level` configuration key and defaults to `info`.
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: OTLP JSON span exporter
//! - `rotating`: Size-rotated trace file

mod exporter;
mod init;
mod rotating;

pub use init::{filter_for, init_tracing, DEFAULT_TRACE_LEVEL};

/// Service and instrumentation scope name on exported spans.
pub const SERVICE_NAME: &str = "Marquee";

/// File name of the active trace file.
pub const TRACE_FILE_NAME: &str = "marquee-otlp.json";
