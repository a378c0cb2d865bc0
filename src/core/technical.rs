use crate::core::{Action, RewriteResult, RewriteStrategy};
use crate::utils::error::Result;
use crate::utils::text::split_sentences;

const DEFAULT_USAGE: &str = "used to solve a specific programming problem in a reusable way";

/// 主題判斷，依序比對；第一個命中者決定用途說明
const THEMES: &[(&[&str], &str)] = &[
    (
        &["data", "state"],
        "used to store and manage the information an application keeps track of",
    ),
    (
        &["event", "click"],
        "used to react to user actions such as clicks, key presses and form input",
    ),
    (
        &["async", "promise"],
        "used to handle work that finishes later without blocking the rest of the program",
    ),
    (
        &["component"],
        "used to build reusable, self-contained pieces of a user interface",
    ),
    (
        &["api"],
        "used to let separate pieces of software talk to each other through a defined contract",
    ),
];

pub fn usage_phrase(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    THEMES
        .iter()
        .find(|(markers, _)| markers.iter().any(|marker| lower.contains(marker)))
        .map(|(_, phrase)| *phrase)
        .unwrap_or(DEFAULT_USAGE)
}

pub struct TechnicalStrategy;

impl RewriteStrategy for TechnicalStrategy {
    fn action(&self) -> Action {
        Action::Technical
    }

    fn rewrite(&self, text: &str) -> Result<RewriteResult> {
        let sentences = split_sentences(text);
        let concept = sentences
            .first()
            .cloned()
            .unwrap_or_else(|| text.trim().to_string());
        let takeaway = sentences.iter().take(2).cloned().collect::<Vec<_>>().join(" ");

        let body = format!(
            "🔧 Core concept: {}\n\n📌 In practice: This is {}.\n\n💡 Key takeaway: {}",
            concept,
            usage_phrase(text),
            if takeaway.is_empty() { &concept } else { &takeaway }
        );

        Ok(RewriteResult::new(Action::Technical, body))
    }
}
