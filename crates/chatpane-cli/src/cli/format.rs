//! `chatpane format`: print the markup the widget renders for a message.

use chatpane_core::markup;
use chatpane_types::config::ListWrapping;

use crate::state::AppState;

/// Literal `\n` sequences in `text` are treated as line breaks so multi-line
/// messages can be passed as one shell argument.
pub fn format_message(state: &AppState, text: &str, all_runs: bool, json: bool) -> anyhow::Result<()> {
    let mut options = state.format_options();
    if all_runs {
        options.list_wrapping = ListWrapping::AllRuns;
    }

    let raw = unescape_newlines(text);
    let markup = markup::format_with(&raw, &options);

    if json {
        let body = serde_json::json!({
            "input": raw,
            "markup": markup.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{markup}");
    }
    Ok(())
}

fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_newlines() {
        assert_eq!(unescape_newlines(r"- a\n- b"), "- a\n- b");
        assert_eq!(unescape_newlines("plain"), "plain");
    }

    #[test]
    fn test_unescaped_input_formats_as_list() {
        let raw = unescape_newlines(r"- a\n- b");
        assert_eq!(
            markup::format(&raw).as_str(),
            "<ul><li>a</li><li>b</li></ul>"
        );
    }
}
