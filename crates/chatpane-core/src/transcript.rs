//! Ordered transcript of rendered entries and the auto-scroll policy.
//!
//! The transcript always starts with a placeholder (welcome) entry. It is
//! append-only; `clear` drops everything after the placeholder.

use chrono::{DateTime, Utc};

use chatpane_types::chat::Sender;

use crate::markup::{self, FormatOptions, SafeMarkup};

/// One rendered message in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    /// The text as typed or received, before formatting.
    pub raw: String,
    pub markup: SafeMarkup,
    pub created_at: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Format `raw` and stamp the entry with the current time.
    pub fn new(sender: Sender, raw: impl Into<String>, options: &FormatOptions) -> Self {
        let raw = raw.into();
        let markup = markup::format_with(&raw, options);
        Self {
            sender,
            raw,
            markup,
            created_at: Utc::now(),
        }
    }

    /// `HH:MM` label for the entry timestamp.
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// Append-only sequence of entries behind a fixed placeholder.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new(placeholder: TranscriptEntry) -> Self {
        Self {
            entries: vec![placeholder],
        }
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry except the placeholder.
    pub fn clear(&mut self) {
        self.entries.truncate(1);
    }

    /// All entries, placeholder first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries appended since construction or the last clear.
    pub fn history(&self) -> &[TranscriptEntry] {
        &self.entries[1..]
    }

    pub fn placeholder(&self) -> &TranscriptEntry {
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }
}

/// Scroll position reported by the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

/// What the view should do after an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    None,
    SmoothToBottom,
}

/// Auto-scroll only when the viewer was already at the bottom.
///
/// Updated on every manual scroll; read (never written) by appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    at_bottom: bool,
}

impl ScrollPolicy {
    /// Distance in pixels that still counts as "at the bottom".
    const TOLERANCE: f64 = 1.0;

    pub fn new() -> Self {
        Self { at_bottom: true }
    }

    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        let remaining = metrics.scroll_height - metrics.scroll_top - metrics.client_height;
        self.at_bottom = remaining <= Self::TOLERANCE;
    }

    pub fn after_append(&self) -> ScrollAction {
        if self.at_bottom {
            ScrollAction::SmoothToBottom
        } else {
            ScrollAction::None
        }
    }

    /// Back to the initial state, e.g. after the transcript was cleared.
    pub fn reset(&mut self) {
        self.at_bottom = true;
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sender: Sender, raw: &str) -> TranscriptEntry {
        TranscriptEntry::new(sender, raw, &FormatOptions::default())
    }

    #[test]
    fn test_entry_formats_raw_text() {
        let e = entry(Sender::Bot, "**hi**");
        assert_eq!(e.raw, "**hi**");
        assert_eq!(e.markup.as_str(), "<strong>hi</strong>");
    }

    #[test]
    fn test_time_label_shape() {
        let label = entry(Sender::User, "x").time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_transcript_append_order() {
        let mut t = Transcript::new(entry(Sender::Bot, "welcome"));
        assert!(t.is_empty());
        t.push(entry(Sender::User, "one"));
        t.push(entry(Sender::Bot, "two"));

        let raws: Vec<&str> = t.entries().iter().map(|e| e.raw.as_str()).collect();
        assert_eq!(raws, ["welcome", "one", "two"]);
        assert_eq!(t.history().len(), 2);
    }

    #[test]
    fn test_transcript_clear_keeps_placeholder() {
        let mut t = Transcript::new(entry(Sender::Bot, "welcome"));
        t.push(entry(Sender::User, "one"));
        t.clear();
        assert_eq!(t.len(), 1);
        assert_eq!(t.placeholder().raw, "welcome");

        t.clear();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_scroll_policy_starts_at_bottom() {
        assert_eq!(ScrollPolicy::new().after_append(), ScrollAction::SmoothToBottom);
    }

    #[test]
    fn test_scroll_policy_respects_scrolled_up_viewer() {
        let mut policy = ScrollPolicy::new();
        policy.on_scroll(ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 200.0,
            client_height: 400.0,
        });
        assert!(!policy.is_at_bottom());
        assert_eq!(policy.after_append(), ScrollAction::None);

        policy.on_scroll(ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 599.5,
            client_height: 400.0,
        });
        assert!(policy.is_at_bottom());
        assert_eq!(policy.after_append(), ScrollAction::SmoothToBottom);
    }

    #[test]
    fn test_scroll_policy_reset() {
        let mut policy = ScrollPolicy::new();
        policy.on_scroll(ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 0.0,
            client_height: 400.0,
        });
        policy.reset();
        assert!(policy.is_at_bottom());
    }
}
