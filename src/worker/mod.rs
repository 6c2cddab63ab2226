//! Background worker thread for catalog reads.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::MarqueeWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name under which catalog requests are posted to the worker.
pub const WORKER_NAME: &str = "marquee";
