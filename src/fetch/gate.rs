//! Permission gate in front of the fetch source.
//!
//! Zellij answers the permission prompt asynchronously, and the initial fetch
//! is issued before that answer arrives. [`PermissionGate`] decides, for every
//! fetch the handler asks for, whether it can go out now, has to wait for the
//! answer, or can never run because the user said no.
//!
//! ```text
//!            grant()
//! Pending ─────────────► Granted   admit → Dispatch
//!    │
//!    │ deny()
//!    └─────────────────► Denied    admit → Reject
//!
//! Pending: admit → Deferred (queued until grant() or deny())
//! ```

use crate::fetch::request::FetchRequest;

/// What the runtime must do with one fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Permissions are granted; send the request to the source now.
    Dispatch(FetchRequest),

    /// The permission answer is still outstanding; the gate kept the request.
    Deferred,

    /// Permissions were denied; settle the request as failed right away.
    Reject(FetchRequest),
}

/// Tracks the permission answer and the fetches waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionGate {
    /// No answer yet. Holds the fetches issued so far, oldest first.
    Pending(Vec<FetchRequest>),
    Granted,
    Denied,
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::Pending(Vec::new())
    }
}

impl PermissionGate {
    /// Creates a gate that waits for the permission answer with `initial`
    /// already queued.
    #[must_use]
    pub fn with_initial(initial: FetchRequest) -> Self {
        Self::Pending(vec![initial])
    }

    /// Routes a newly issued fetch.
    ///
    /// # Parameters
    ///
    /// * `request` - The fetch the handler asked the runtime to perform
    ///
    /// # Returns
    ///
    /// [`GateDecision::Dispatch`] once permissions are granted,
    /// [`GateDecision::Deferred`] while the answer is outstanding, and
    /// [`GateDecision::Reject`] for every fetch issued after a denial.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee::fetch::{FetchRequest, GateDecision, PermissionGate, RequestToken};
    ///
    /// let mut gate = PermissionGate::default();
    /// let request = FetchRequest { token: RequestToken::FIRST, search_term: String::new() };
    ///
    /// assert_eq!(gate.admit(request.clone()), GateDecision::Deferred);
    /// assert!(gate.deny().contains(&request));
    /// assert_eq!(gate.admit(request.clone()), GateDecision::Reject(request));
    /// ```
    pub fn admit(&mut self, request: FetchRequest) -> GateDecision {
        match self {
            Self::Granted => GateDecision::Dispatch(request),
            Self::Denied => {
                tracing::debug!(token = %request.token, "rejecting fetch, permissions denied");
                GateDecision::Reject(request)
            }
            Self::Pending(queue) => {
                tracing::debug!(token = %request.token, "deferring fetch until permissions are granted");
                queue.push(request);
                GateDecision::Deferred
            }
        }
    }

    /// Records a grant and returns the queued fetches to dispatch.
    ///
    /// A repeated grant returns nothing.
    pub fn grant(&mut self) -> Vec<FetchRequest> {
        match std::mem::replace(self, Self::Granted) {
            Self::Pending(queue) => queue,
            Self::Granted | Self::Denied => Vec::new(),
        }
    }

    /// Records a denial and returns the queued fetches, which the caller
    /// must settle as failed.
    pub fn deny(&mut self) -> Vec<FetchRequest> {
        match std::mem::replace(self, Self::Denied) {
            Self::Pending(queue) => queue,
            Self::Granted | Self::Denied => Vec::new(),
        }
    }

    /// Number of fetches waiting for the permission answer.
    #[must_use]
    pub fn queued(&self) -> usize {
        match self {
            Self::Pending(queue) => queue.len(),
            Self::Granted | Self::Denied => 0,
        }
    }
}
