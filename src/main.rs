//! Zellij plugin entry point for Marquee.
//!
//! This binary is the shim between Zellij's plugin API and the library. It
//! translates Zellij events into [`marquee::Event`]s, runs them through
//! [`handle_event`], and executes the resulting actions against the host.
//!
//! ```text
//! ┌──────────────────┐   FetchMovies    ┌──────────────────┐
//! │  Plugin (main)   │ ───────────────→ │  MarqueeWorker   │
//! │  - key mapping   │ ←─────────────── │  (catalog reads) │
//! │  - rendering     │  MoviesFetched   └──────────────────┘
//! │  - web_request   │ ───────────────→  host HTTP client
//! └──────────────────┘ ←───────────────  WebRequestResult
//! ```
//!
//! Fetches issued before the user grants permissions are held back by a
//! [`PermissionGate`] and dispatched once the grant arrives. After a denial
//! every fetch, queued or new, settles as a failure so the view never stays
//! in its loading state.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use marquee::fetch::{http, GateDecision, PermissionGate};
use marquee::worker::{MarqueeWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use marquee::{
    handle_event, Action, AppState, Config, Event, FetchError, FetchRequest, FetchSource,
    InputMode, ThemeContext,
};

register_plugin!(State);
register_worker!(MarqueeWorker, marquee_worker, MARQUEE_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with host concerns: the configured fetch
/// source, the resolved theme and the permission gate.
struct State {
    app: AppState,
    theme: ThemeContext,
    source: FetchSource,
    gate: PermissionGate,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        let (app, initial) = marquee::initialize(&config);
        Self {
            app,
            theme: ThemeContext::default(),
            source: config.source,
            gate: PermissionGate::with_initial(initial),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, resolves the theme, requests permissions and
    /// queues the initial unfiltered fetch.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let (config, config_error) = match Config::from_zellij(&configuration) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        };
        marquee::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        if let Some(e) = config_error {
            tracing::error!(error = %e, "invalid configuration, using defaults");
        }

        tracing::debug!(source = ?config.source, "parsed configuration");
        self.theme = ThemeContext::init(&config);

        let (app, initial) = marquee::initialize(&config);
        tracing::debug!(ordering = ?app.controller.ordering(), "view controller ready");
        self.app = app;
        self.source = config.source;
        self.gate = PermissionGate::with_initial(initial);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through the handler and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(cols);
        marquee::ui::render(&self.app, self.theme.theme(), rows, cols);
    }
}

impl State {
    /// Runs one library event and its actions. Returns the render flag.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        if self.app.input_mode == InputMode::Search {
            return match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) if !ctrl => Some(Event::Char(c)),
                _ => None,
            };
        }

        if self.app.details_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetails),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Char('n') if ctrl => Event::KeyDown,
            BareKey::Char('p') if ctrl => Event::KeyUp,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
            BareKey::Right | BareKey::Char('l') => Event::KeyRight,
            BareKey::Enter => Event::OpenDetails,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('r') => Event::Reload,
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Releases or fails the held-back fetches once the user answers the
    /// permission prompt.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => {
                let released = self.gate.grant();
                tracing::debug!(deferred = released.len(), "permissions granted");
                for request in &released {
                    self.start_fetch(request);
                }
                false
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - fetches cannot run");
                let mut render = false;
                for request in self.gate.deny() {
                    render |= self.reject_fetch(&request);
                }
                render
            }
        }
    }

    /// Settles `request` as a permission failure. Returns the render flag.
    fn reject_fetch(&mut self, request: &FetchRequest) -> bool {
        self.dispatch(&Event::MoviesFetched {
            token: request.token,
            outcome: Err(FetchError::PermissionDenied),
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(token = %response.token(), "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(token) = http::token_from_context(context) else {
            tracing::debug!(status, "web response without a marquee token");
            return None;
        };

        let search_term = context.get(http::TERM_CONTEXT_KEY).map_or("", String::as_str);
        tracing::debug!(
            token = %token,
            search_term = %search_term,
            status,
            body_len = body.len(),
            "web response received"
        );
        Some(Event::MoviesFetched {
            token,
            outcome: http::decode_response(status, body),
        })
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Sends `request` to the configured source.
    fn start_fetch(&self, request: &FetchRequest) {
        match &self.source {
            FetchSource::Http { endpoint } => {
                let url = http::build_url(endpoint, &request.search_term);
                tracing::debug!(token = %request.token, url = %url, "requesting movies over http");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    http::request_context(request),
                );
            }
            FetchSource::Catalog { path } => {
                Self::post_worker_message(&WorkerMessage::fetch_movies(request, path.clone()));
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch(request) => match self.gate.admit(request) {
                GateDecision::Dispatch(request) => self.start_fetch(&request),
                GateDecision::Deferred => {}
                GateDecision::Reject(request) => {
                    self.reject_fetch(&request);
                }
            },
        }
    }
}
