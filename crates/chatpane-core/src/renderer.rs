//! Renderer port and the in-memory transcript view.
//!
//! The controller only talks to a [`Renderer`]; concrete front-ends bind it
//! to their own UI primitives. [`TranscriptView`] is the headless
//! implementation: it keeps the transcript, applies the scroll policy, and
//! can export the conversation as HTML.

use std::sync::Mutex;

use chatpane_types::chat::Sender;

use crate::markup::FormatOptions;
use crate::transcript::{ScrollAction, ScrollMetrics, ScrollPolicy, Transcript, TranscriptEntry};

/// Display capability the turn controller drives.
pub trait Renderer: Send + Sync {
    /// Append one entry to the end of the transcript.
    fn append(&self, entry: TranscriptEntry);

    /// Reset the transcript to its placeholder entry.
    fn clear(&self);

    /// Reflect whether a request is in flight (spinner, disabled send button).
    fn set_busy_visual(&self, busy: bool);
}

#[derive(Debug)]
struct ViewState {
    transcript: Transcript,
    scroll: ScrollPolicy,
    busy_visual: bool,
    scroll_requests: usize,
}

/// In-memory transcript view.
#[derive(Debug)]
pub struct TranscriptView {
    state: Mutex<ViewState>,
}

impl TranscriptView {
    pub fn new(placeholder: TranscriptEntry) -> Self {
        Self {
            state: Mutex::new(ViewState {
                transcript: Transcript::new(placeholder),
                scroll: ScrollPolicy::new(),
                busy_visual: false,
                scroll_requests: 0,
            }),
        }
    }

    /// View whose placeholder is a bot welcome message.
    pub fn with_welcome(welcome: &str, options: &FormatOptions) -> Self {
        Self::new(TranscriptEntry::new(Sender::Bot, welcome, options))
    }

    /// Snapshot of all entries, placeholder first.
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.lock().transcript.entries().to_vec()
    }

    /// The entry the transcript starts with and returns to on clear.
    pub fn placeholder(&self) -> TranscriptEntry {
        self.lock().transcript.placeholder().clone()
    }

    /// Snapshot of the entries after the placeholder.
    pub fn history(&self) -> Vec<TranscriptEntry> {
        self.lock().transcript.history().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().transcript.is_empty()
    }

    /// Feed a manual scroll event from the viewport.
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        self.lock().scroll.on_scroll(metrics);
    }

    pub fn is_busy_visual(&self) -> bool {
        self.lock().busy_visual
    }

    /// How many appends asked the viewport to scroll to the bottom.
    pub fn scroll_requests(&self) -> usize {
        self.lock().scroll_requests
    }

    /// Export the transcript as HTML message blocks.
    pub fn to_html(&self) -> String {
        let state = self.lock();
        state
            .transcript
            .entries()
            .iter()
            .map(entry_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.state.lock().expect("transcript view lock poisoned")
    }
}

impl Renderer for TranscriptView {
    fn append(&self, entry: TranscriptEntry) {
        let mut state = self.lock();
        state.transcript.push(entry);
        if state.scroll.after_append() == ScrollAction::SmoothToBottom {
            state.scroll_requests += 1;
        }
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.transcript.clear();
        state.scroll.reset();
    }

    fn set_busy_visual(&self, busy: bool) {
        self.lock().busy_visual = busy;
    }
}

fn entry_html(entry: &TranscriptEntry) -> String {
    let icon = match entry.sender {
        Sender::User => "fa-user",
        Sender::Bot => "fa-robot",
    };
    format!(
        r#"<div class="message {sender}-message"><div class="message-avatar"><i class="fas {icon}"></i></div><div class="message-content">{markup}</div></div>"#,
        sender = entry.sender,
        markup = entry.markup,
    )
}
