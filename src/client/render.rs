use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

use super::state::UiState;
use crate::models::SearchResult;

pub const LOADING_ID: &str = "loading";
pub const RESULTS_CONTAINER_ID: &str = "resultsContainer";
pub const RESULTS_LIST_ID: &str = "resultsList";
pub const ERROR_CONTAINER_ID: &str = "errorContainer";
pub const ERROR_MESSAGE_ID: &str = "errorMessage";
pub const HIDDEN_CLASS: &str = "d-none";

const PARAGRAPH_BREAK: &str = "<br><br>";

fn bold_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern compiles"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    /// Escaped snippet with paragraph breaks and `<strong>` spans.
    pub content_html: String,
    pub source_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub loading_visible: bool,
    pub results_visible: bool,
    pub error_visible: bool,
    pub error_message: Option<String>,
    pub cards: Vec<ResultCard>,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turns `\n\n` into paragraph breaks and `**text**` into `<strong>` spans.
///
/// Markers pair up left to right, shortest span first. A marker without a
/// partner on the same line is left as literal text.
pub fn format_snippet(snippet: &str) -> String {
    let paragraphs = escape_html(snippet).replace("\n\n", PARAGRAPH_BREAK);
    bold_pattern()
        .replace_all(&paragraphs, "<strong>$1</strong>")
        .into_owned()
}

pub fn render_card(result: &SearchResult) -> ResultCard {
    ResultCard {
        title: result.title.clone(),
        content_html: format_snippet(&result.snippet),
        source_note: result
            .display_link
            .as_deref()
            .filter(|link| !link.is_empty())
            .map(|link| format!("Source: {}", link)),
    }
}

pub fn render(state: &UiState) -> View {
    match state {
        UiState::Idle => View::default(),
        UiState::Loading => View {
            loading_visible: true,
            ..View::default()
        },
        UiState::ShowingResults(results) => View {
            results_visible: true,
            cards: results.iter().map(render_card).collect(),
            ..View::default()
        },
        UiState::ShowingError(message) => View {
            error_visible: true,
            error_message: Some(message.clone()),
            ..View::default()
        },
    }
}

fn class_attr(base: &str, visible: bool) -> String {
    match (base.is_empty(), visible) {
        (true, true) => String::new(),
        (true, false) => format!(r#" class="{}""#, HIDDEN_CLASS),
        (false, true) => format!(r#" class="{}""#, base),
        (false, false) => format!(r#" class="{} {}""#, base, HIDDEN_CLASS),
    }
}

impl ResultCard {
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="card result-card p-3 mb-3">"#);
        let _ = write!(
            html,
            r#"<h3 class="result-title">{}</h3><div class="result-content mt-3">{}</div>"#,
            escape_html(&self.title),
            self.content_html
        );
        if let Some(note) = &self.source_note {
            let _ = write!(
                html,
                r#"<div class="source-reference mt-3"><small class="text-muted">{}</small></div>"#,
                escape_html(note)
            );
        }
        html.push_str("</div>");
        html
    }

    pub fn to_text(&self) -> String {
        let content = self
            .content_html
            .replace("<br>", "\n")
            .replace("<strong>", "")
            .replace("</strong>", "");
        let mut text = format!("{}\n\n{}", self.title, unescape_html(&content));
        if let Some(note) = &self.source_note {
            let _ = write!(text, "\n\n{}", note);
        }
        text
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

impl View {
    /// Markup for the loading, error and results regions of the page.
    pub fn to_html(&self) -> String {
        let message = self.error_message.as_deref().map(escape_html).unwrap_or_default();
        let cards: String = self.cards.iter().map(ResultCard::to_html).collect();

        format!(
            concat!(
                r#"<div id="{loading}"{loading_class}></div>"#,
                r#"<div id="{error_container}"{error_class}><span id="{error_message}">{message}</span></div>"#,
                r#"<div id="{results_container}"{results_class}><div id="{results_list}">{cards}</div></div>"#,
            ),
            loading = LOADING_ID,
            loading_class = class_attr("loading", self.loading_visible),
            error_container = ERROR_CONTAINER_ID,
            error_class = class_attr("", self.error_visible),
            error_message = ERROR_MESSAGE_ID,
            message = message,
            results_container = RESULTS_CONTAINER_ID,
            results_class = class_attr("", self.results_visible),
            results_list = RESULTS_LIST_ID,
            cards = cards,
        )
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        if self.loading_visible {
            return "Searching...".to_string();
        }
        if self.error_visible {
            return self.error_message.clone().unwrap_or_default();
        }
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| format!("{}. {}", index + 1, card.to_text()))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}
