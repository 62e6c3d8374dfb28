//! Plain text to display markup.
//!
//! `format` runs a fixed, ordered pipeline of pure text rewrites. The order
//! is significant: list detection must see the raw `- ` prefixes before the
//! emphasis stages rewrite asterisks, and the phone stage must run last so
//! its digits are never re-read by another stage.
//!
//! Every input is HTML-escaped first, so the only tags in the output are the
//! ones the pipeline itself emits. Chat replies come from a remote service
//! and are treated as untrusted text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use chatpane_types::config::ListWrapping;

const BR: &str = "<br>";

static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<li>.*?</li>)+").expect("valid list run regex"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid strong regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid emphasis regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3,4}-[0-9]{4}").expect("valid phone regex"));

/// Markup produced by the pipeline, safe to insert into the transcript.
///
/// Only constructible inside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    pub(crate) fn new(markup: String) -> Self {
        Self(markup)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Knobs of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub list_wrapping: ListWrapping,
}

/// One rewrite of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Escape,
    LineBreaks,
    ListItems,
    WrapLists,
    Strong,
    Emphasis,
    PhoneLinks,
}

/// The stages in the order `format` applies them.
pub const PIPELINE: [Stage; 7] = [
    Stage::Escape,
    Stage::LineBreaks,
    Stage::ListItems,
    Stage::WrapLists,
    Stage::Strong,
    Stage::Emphasis,
    Stage::PhoneLinks,
];

impl Stage {
    pub fn apply(self, input: &str, options: &FormatOptions) -> String {
        match self {
            Stage::Escape => escape_html(input),
            Stage::LineBreaks => line_breaks(input),
            Stage::ListItems => list_items(input),
            Stage::WrapLists => wrap_lists(input, options.list_wrapping),
            Stage::Strong => strong(input),
            Stage::Emphasis => emphasis(input),
            Stage::PhoneLinks => phone_links(input),
        }
    }
}

/// Format with default options.
pub fn format(raw: &str) -> SafeMarkup {
    format_with(raw, &FormatOptions::default())
}

pub fn format_with(raw: &str, options: &FormatOptions) -> SafeMarkup {
    let text = PIPELINE
        .iter()
        .fold(raw.to_string(), |text, stage| stage.apply(&text, options));
    SafeMarkup::new(text)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn line_breaks(input: &str) -> String {
    input.replace('\n', BR)
}

/// Turn `- item` lines into `<li>` elements.
///
/// Lines are the segments between `<br>` markers. No `<br>` is kept on a
/// boundary that touches a list item, so consecutive items end up adjacent.
pub fn list_items(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_item: Option<bool> = None;

    for segment in input.split(BR) {
        let item = segment.strip_prefix("- ").filter(|body| !body.is_empty());
        let is_item = item.is_some();

        if prev_is_item == Some(false) && !is_item {
            out.push_str(BR);
        }

        match item {
            Some(body) => {
                out.push_str("<li>");
                out.push_str(body);
                out.push_str("</li>");
            }
            None => out.push_str(segment),
        }
        prev_is_item = Some(is_item);
    }

    out
}

/// Wrap contiguous runs of `<li>` elements in `<ul>`.
pub fn wrap_lists(input: &str, wrapping: ListWrapping) -> String {
    match wrapping {
        ListWrapping::FirstRun => LIST_RUN.replace(input, "<ul>${0}</ul>").into_owned(),
        ListWrapping::AllRuns => LIST_RUN.replace_all(input, "<ul>${0}</ul>").into_owned(),
    }
}

pub fn strong(input: &str) -> String {
    STRONG.replace_all(input, "<strong>${1}</strong>").into_owned()
}

pub fn emphasis(input: &str) -> String {
    EMPHASIS.replace_all(input, "<em>${1}</em>").into_owned()
}

pub fn phone_links(input: &str) -> String {
    PHONE
        .replace_all(input, r#"<a href="tel:${0}">${0}</a>"#)
        .into_owned()
}
