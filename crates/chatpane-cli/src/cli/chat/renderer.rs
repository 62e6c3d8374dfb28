//! Terminal rendering of transcript entries.
//!
//! `TerminalRenderer` implements the core [`Renderer`] port: every appended
//! entry is recorded in a [`TranscriptView`] (for `/save` and `/stats`) and
//! printed with console styling. The busy state drives a thinking spinner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use regex::{Captures, Regex};

use chatpane_core::markup::FormatOptions;
use chatpane_core::renderer::{Renderer, TranscriptView};
use chatpane_core::transcript::TranscriptEntry;
use chatpane_types::chat::Sender;

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<strong>(.*?)</strong>").expect("valid regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<em>(.*?)</em>").expect("valid regex"));
static PHONE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href="tel:[^"]*">(.*?)</a>"#).expect("valid regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<li>(.*?)</li>").expect("valid regex"));
static LIST_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:<ul>)?((?:<li>.*?</li>)+)(?:</ul>)?").expect("valid regex")
});

/// Convert widget markup into styled terminal text.
///
/// Only the tags the markup pipeline emits are understood; entities are
/// decoded last so escaped user text prints as typed. Each `<br>` becomes
/// exactly one newline, so blank lines between paragraphs survive.
pub fn markup_to_terminal(markup: &str) -> String {
    let text = STRONG.replace_all(markup, |caps: &Captures| style(&caps[1]).bold().to_string());
    let text = EMPHASIS.replace_all(&text, |caps: &Captures| style(&caps[1]).italic().to_string());
    let text = PHONE_LINK.replace_all(&text, |caps: &Captures| {
        style(&caps[1]).cyan().underlined().to_string()
    });
    let text = bullet_lines(&text).replace("<br>", "\n");

    decode_entities(&text)
}

/// One bullet line per list item, separated from surrounding text by a
/// single newline. List items never carry their own `<br>` markers.
fn bullet_lines(text: &str) -> String {
    LIST_BLOCK
        .replace_all(text, |caps: &Captures| {
            let Some(block) = caps.get(0) else {
                return String::new();
            };
            let items: Vec<String> = LIST_ITEM
                .captures_iter(&caps[1])
                .map(|item| format!("  \u{2022} {}", &item[1]))
                .collect();

            let mut out = String::new();
            if block.start() > 0 {
                out.push('\n');
            }
            out.push_str(&items.join("\n"));
            if block.end() < text.len() {
                out.push('\n');
            }
            out
        })
        .into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Which entries the renderer prints as they are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Print user and bot entries.
    All,
    /// Print bot entries only; the line editor already shows user input.
    BotOnly,
    /// Print nothing and show no spinner (machine-readable output).
    Silent,
}

impl Echo {
    fn prints(self, sender: Sender) -> bool {
        match self {
            Echo::All => true,
            Echo::BotOnly => sender == Sender::Bot,
            Echo::Silent => false,
        }
    }
}

/// Prints transcript entries to the terminal.
pub struct TerminalRenderer {
    view: TranscriptView,
    spinner: Mutex<Option<ProgressBar>>,
    echo: Echo,
    /// Whether the placeholder has been printed since start or the last clear.
    welcome_shown: AtomicBool,
}

impl TerminalRenderer {
    pub fn new(welcome: &str, options: &FormatOptions, echo: Echo) -> Self {
        Self {
            view: TranscriptView::with_welcome(welcome, options),
            spinner: Mutex::new(None),
            echo,
            welcome_shown: AtomicBool::new(false),
        }
    }

    /// The recorded transcript.
    pub fn view(&self) -> &TranscriptView {
        &self.view
    }

    /// Print one entry with its sender label.
    pub fn print_entry(&self, entry: &TranscriptEntry) {
        println!();
        println!("{}", format_entry(entry));
    }

    /// Print the placeholder entry (the welcome message) unless it is
    /// already on screen. Returns whether it was printed.
    pub fn print_welcome(&self) -> bool {
        if self.welcome_shown.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.print_entry(&self.view.placeholder());
        true
    }
}

/// Label, time and indented body of one entry.
pub fn format_entry(entry: &TranscriptEntry) -> String {
    let label = match entry.sender {
        Sender::User => style("You").green().bold(),
        Sender::Bot => style("Bot").cyan().bold(),
    };
    let body = markup_to_terminal(entry.markup.as_str()).replace('\n', "\n    ");
    format!(
        "  {label} {}\n    {body}",
        style(entry.time_label()).dim()
    )
}

impl Renderer for TerminalRenderer {
    fn append(&self, entry: TranscriptEntry) {
        if self.echo.prints(entry.sender) {
            // The screen keeps transcript order: placeholder first.
            let print = || {
                self.print_welcome();
                self.print_entry(&entry);
            };
            // Clear the spinner first so the entry is not drawn over.
            if let Some(spinner) = self.spinner.lock().expect("spinner lock poisoned").as_ref() {
                spinner.suspend(print);
            } else {
                print();
            }
        }
        self.view.append(entry);
    }

    fn clear(&self) {
        self.view.clear();
        self.welcome_shown.store(false, Ordering::SeqCst);
    }

    fn set_busy_visual(&self, busy: bool) {
        self.view.set_busy_visual(busy);

        if self.echo == Echo::Silent {
            return;
        }

        let mut slot = self.spinner.lock().expect("spinner lock poisoned");
        if busy {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.cyan} {msg}")
                    .expect("valid spinner template"),
            );
            spinner.set_message("thinking...");
            spinner.enable_steady_tick(Duration::from_millis(80));
            *slot = Some(spinner);
        } else if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}
