//! Worker thread implementation for catalog reads.
//!
//! Reading and filtering the catalog file happens here so the plugin's render
//! loop never blocks on disk I/O.

use crate::catalog::{CatalogFile, MovieSource};
use crate::domain::error::Result;
use crate::domain::{FetchError, Movie};
use crate::fetch::RequestToken;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Runs on a separate thread spawned by Zellij. The catalog handle is
/// created on first use and replaced if a request names a different file.
#[derive(Serialize, Deserialize, Default)]
pub struct MarqueeWorker {
    #[serde(skip)]
    catalog: Option<CatalogFile>,
}

impl MarqueeWorker {
    /// Returns the catalog for `catalog_path`, opening it if needed.
    fn catalog_for(&mut self, catalog_path: &str) -> &CatalogFile {
        match &mut self.catalog {
            Some(catalog) if catalog.path() == Path::new(catalog_path) => {}
            slot => {
                tracing::debug!(catalog_path = %catalog_path, "opening catalog");
                *slot = Some(CatalogFile::new(catalog_path));
            }
        }
        self.catalog.get_or_insert_with(|| CatalogFile::new(catalog_path))
    }

    /// Helper for turning a catalog result into a response with consistent logging.
    fn handle_catalog_result(
        token: RequestToken,
        result: Result<Vec<Movie>>,
    ) -> WorkerResponse {
        match result {
            Ok(movies) => {
                tracing::debug!(token = %token, movie_count = movies.len(), "catalog read successful");
                WorkerResponse::MoviesFetched { token, movies }
            }
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "catalog read failed");
                WorkerResponse::FetchFailed {
                    token,
                    error: FetchError::from(e),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::FetchMovies {
                token,
                search_term,
                catalog_path,
                ..
            } => {
                let result = self.catalog_for(&catalog_path).fetch_movies(&search_term);
                Self::handle_catalog_result(token, result)
            }
        }
    }
}

fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for MarqueeWorker {
    /// Handles a JSON-encoded [`WorkerMessage`] and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
            }
        }
    }
}
