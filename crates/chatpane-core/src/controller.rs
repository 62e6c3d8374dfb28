//! Turn controller: one user message, one round trip, one reply.
//!
//! `TurnController` owns the conversation state the widget needs: the
//! session identifier, the busy flag, the pending input, and the count of
//! completed turns. At most one request is in flight at a time; every
//! failure is recovered here and rendered as a fixed fallback message.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use tracing::{debug, info, warn};

use chatpane_types::chat::{ChatRequest, HealthStatus, Sender};
use chatpane_types::config::MessageCatalog;
use chatpane_types::error::{ChatError, DictationError};
use chatpane_types::session::SessionId;

use crate::backend::ChatBackend;
use crate::dictation::DictationProvider;
use crate::markup::FormatOptions;
use crate::renderer::Renderer;
use crate::transcript::TranscriptEntry;

/// Why a send produced no turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Input was empty after trimming.
    Empty,
    /// Another request is still in flight.
    Busy,
}

/// Result of one call to [`TurnController::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing was rendered and no request was made.
    Skipped(SkipReason),
    /// The server replied; the reply has been rendered.
    Replied(String),
    /// The turn failed; the fallback message has been rendered.
    Failed(ChatError),
}

/// Drives turns against a [`ChatBackend`] and renders them.
pub struct TurnController<B: ChatBackend, R: Renderer> {
    backend: B,
    renderer: R,
    catalog: MessageCatalog,
    format_options: FormatOptions,
    session: Mutex<SessionId>,
    busy: AtomicBool,
    completed_turns: AtomicU32,
    input: Mutex<String>,
}

/// Releases the busy flag when dropped, including on cancellation.
struct BusyGuard<'a, R: Renderer> {
    busy: &'a AtomicBool,
    renderer: &'a R,
}

impl<R: Renderer> Drop for BusyGuard<'_, R> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
        self.renderer.set_busy_visual(false);
    }
}

impl<B: ChatBackend, R: Renderer> TurnController<B, R> {
    /// Create a controller with a freshly generated session.
    pub fn new(backend: B, renderer: R, catalog: MessageCatalog) -> Self {
        let session = SessionId::generate();
        info!(session_id = %session, "Chat session started");
        Self {
            backend,
            renderer,
            catalog,
            format_options: FormatOptions::default(),
            session: Mutex::new(session),
            busy: AtomicBool::new(false),
            completed_turns: AtomicU32::new(0),
            input: Mutex::new(String::new()),
        }
    }

    pub fn with_format_options(mut self, options: FormatOptions) -> Self {
        self.format_options = options;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn session_id(&self) -> SessionId {
        self.session.lock().expect("session lock poisoned").clone()
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Turns that received a reply since the last clear.
    pub fn completed_turns(&self) -> u32 {
        self.completed_turns.load(Ordering::SeqCst)
    }

    /// Current content of the input box.
    pub fn input(&self) -> String {
        self.input.lock().expect("input lock poisoned").clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *self.input.lock().expect("input lock poisoned") = text.into();
    }

    /// Replace the session with a freshly generated one.
    pub fn new_session(&self) -> SessionId {
        let session = SessionId::generate();
        *self.session.lock().expect("session lock poisoned") = session.clone();
        info!(session_id = %session, "New chat session");
        session
    }

    /// Send `text` as one turn.
    ///
    /// Empty (after trimming) input and calls made while another request is
    /// in flight are no-ops. Otherwise the user entry is rendered at once and
    /// the reply, or the fallback message, after the round trip.
    pub async fn send(&self, text: &str) -> TurnOutcome {
        let message = text.trim();
        if message.is_empty() {
            debug!("Ignoring empty message");
            return TurnOutcome::Skipped(SkipReason::Empty);
        }

        let Some(guard) = self.try_acquire() else {
            debug!("Ignoring message while a request is in flight");
            return TurnOutcome::Skipped(SkipReason::Busy);
        };

        self.run_turn(guard, message).await
    }

    /// Render `message` and perform its round trip while `_guard` holds the
    /// busy flag.
    async fn run_turn(&self, _guard: BusyGuard<'_, R>, message: &str) -> TurnOutcome {
        self.renderer.set_busy_visual(true);
        self.append(Sender::User, message);

        let request = ChatRequest {
            message: message.to_string(),
            session_id: self.session_id(),
        };
        debug!(session_id = %request.session_id, chars = message.chars().count(), "Sending chat request");

        match self.backend.chat(&request).await {
            Ok(reply) => {
                self.append(Sender::Bot, &reply.response);
                let turns = self.completed_turns.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(session_id = %request.session_id, turns, "Chat turn completed");
                TurnOutcome::Replied(reply.response)
            }
            Err(err) => {
                warn!(session_id = %request.session_id, error = %err, "Chat turn failed");
                self.append(Sender::Bot, &self.catalog.fallback);
                TurnOutcome::Failed(ChatError::from(err))
            }
        }
    }

    /// Send whatever is in the input box, emptying it.
    ///
    /// While busy the input box is left untouched.
    pub async fn submit(&self) -> TurnOutcome {
        // The flag is taken before the input so a rejected submit never
        // consumes it.
        let Some(guard) = self.try_acquire() else {
            debug!("Ignoring submit while a request is in flight");
            return TurnOutcome::Skipped(SkipReason::Busy);
        };

        let text = {
            let mut input = self.input.lock().expect("input lock poisoned");
            if input.trim().is_empty() {
                return TurnOutcome::Skipped(SkipReason::Empty);
            }
            std::mem::take(&mut *input)
        };

        self.run_turn(guard, text.trim()).await
    }

    /// Pre-fill the input box with `text` and submit it.
    pub async fn quick_message(&self, text: &str) -> TurnOutcome {
        self.set_input(text);
        self.submit().await
    }

    /// Reset the transcript to its placeholder and start a new session.
    pub fn clear_conversation(&self) -> SessionId {
        self.renderer.clear();
        self.completed_turns.store(0, Ordering::SeqCst);
        self.new_session()
    }

    /// Liveness check against the chat server.
    ///
    /// A failure is rendered as an error notice but does not block later
    /// sends.
    pub async fn check_health(&self) -> Result<HealthStatus, ChatError> {
        match self.backend.health().await {
            Ok(status) => {
                info!(status = %status.status, "Chat server reachable");
                Ok(status)
            }
            Err(err) => {
                warn!(error = %err, "Chat server health check failed");
                let notice = self.catalog.error_notice(&self.catalog.health_error);
                self.append(Sender::Bot, &notice);
                Err(ChatError::from(err))
            }
        }
    }

    /// Fill the input box from a dictation provider. Does not send.
    pub async fn dictate<D: DictationProvider>(&self, provider: &D) -> Result<String, DictationError> {
        let text = provider.request_dictation().await?;
        self.set_input(text.clone());
        Ok(text)
    }

    fn try_acquire(&self) -> Option<BusyGuard<'_, R>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(BusyGuard {
            busy: &self.busy,
            renderer: &self.renderer,
        })
    }

    fn append(&self, sender: Sender, raw: &str) {
        self.renderer
            .append(TranscriptEntry::new(sender, raw, &self.format_options));
    }
}
