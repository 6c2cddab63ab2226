//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread asks the worker to read the local catalog; the worker
//! answers with the movies for that request's token. Trace context travels
//! with each request so worker spans nest under the search that caused them.

use crate::domain::{FetchError, Movie};
use crate::fetch::{FetchRequest, RequestToken};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the catalog at `catalog_path` and filter it by `search_term`.
    FetchMovies {
        /// Token the response must echo.
        token: RequestToken,

        search_term: String,

        /// Catalog file to read. The worker re-reads it on every request.
        catalog_path: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `FetchMovies` message for `request` with the current trace context.
    #[must_use]
    pub fn fetch_movies(request: &FetchRequest, catalog_path: impl Into<String>) -> Self {
        Self::FetchMovies {
            token: request.token,
            search_term: request.search_term.clone(),
            catalog_path: catalog_path.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchMovies { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was read and filtered.
    MoviesFetched {
        token: RequestToken,

        /// Matching movies in catalog order.
        movies: Vec<Movie>,
    },

    /// The catalog could not be read.
    FetchFailed {
        token: RequestToken,
        error: FetchError,
    },
}

impl WorkerResponse {
    /// Token of the request this response settles.
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        match self {
            Self::MoviesFetched { token, .. } | Self::FetchFailed { token, .. } => *token,
        }
    }

    /// Converts the response into a settlement outcome.
    #[must_use]
    pub fn into_outcome(self) -> (RequestToken, Result<Vec<Movie>, FetchError>) {
        match self {
            Self::MoviesFetched { token, movies } => (token, Ok(movies)),
            Self::FetchFailed { token, error } => (token, Err(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_message_carries_request_fields() {
        let request = FetchRequest {
            token: RequestToken::new(4),
            search_term: "dune".to_string(),
        };

        let WorkerMessage::FetchMovies {
            token,
            search_term,
            catalog_path,
            ..
        } = WorkerMessage::fetch_movies(&request, "/tmp/catalog.json");

        assert_eq!(token, RequestToken::new(4));
        assert_eq!(search_term, "dune");
        assert_eq!(catalog_path, "/tmp/catalog.json");
    }

    #[test]
    fn responses_survive_the_json_boundary() {
        let response = WorkerResponse::FetchFailed {
            token: RequestToken::new(2),
            error: FetchError::Catalog("missing".to_string()),
        };

        let payload = serde_json::to_string(&response).unwrap();
        let decoded: WorkerResponse = serde_json::from_str(&payload).unwrap();

        assert_eq!(decoded.token(), RequestToken::new(2));
        assert_eq!(
            decoded.into_outcome().1,
            Err(FetchError::Catalog("missing".to_string()))
        );
    }
}
