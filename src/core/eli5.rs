use crate::core::{Action, RewriteResult, RewriteStrategy};
use crate::utils::error::{Result, SimplifierError};
use crate::utils::text::{first_terminated_sentence, truncate_chars};
use regex::{Captures, Regex};

/// 沒有句尾標點時，重點句最多取的字元數
const KEY_POINT_MAX_CHARS: usize = 120;

const PREAMBLE: &str = "🎈 Simple Explanation:";

/// 唯一採用的術語對照表。順序即優先序：同一位置可匹配多個詞時，先列者勝出，
/// 因此多字詞排在前面。
pub const REPLACEMENT_TABLE: &[(&str, &str)] = &[
    ("programming language", "set of words and rules people use to give a computer instructions"),
    ("interpreted", "read and carried out one step at a time"),
    ("compiled", "translated for the computer ahead of time"),
    ("asynchronous", "happening in the background"),
    ("callback", "follow-up instruction"),
    ("function", "instruction"),
    ("method", "action"),
    ("variable", "container"),
    ("array", "list"),
    ("object", "bundle of related information"),
    ("class", "blueprint"),
    ("parameter", "input"),
    ("argument", "value you hand over"),
    ("algorithm", "step-by-step recipe"),
    ("API", "menu of requests a program understands"),
    ("database", "organized storage box"),
    ("server", "computer that answers requests"),
    ("syntax", "grammar rules"),
    ("boolean", "yes-or-no value"),
    ("string", "piece of text"),
    ("recursion", "something that repeats itself"),
    ("loop", "repeat"),
];

/// 依序套用、不分大小寫、整字匹配的術語替換表
#[derive(Debug, Clone)]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
    pattern: Regex,
}

impl ReplacementTable {
    pub fn new(entries: &[(&str, &str)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(SimplifierError::processing("replacement table cannot be empty"));
        }

        let alternation = entries
            .iter()
            .map(|(term, _)| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).map_err(|e| {
            SimplifierError::processing(format!("invalid replacement table: {}", e))
        })?;

        Ok(Self {
            entries: entries
                .iter()
                .map(|(term, phrase)| (term.to_lowercase(), phrase.to_string()))
                .collect(),
            pattern,
        })
    }

    pub fn canonical() -> Result<Self> {
        Self::new(REPLACEMENT_TABLE)
    }

    /// 單次掃描替換；替換後的文字不會再被匹配。
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                self.phrase_for(matched)
                    .map(str::to_string)
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }

    fn phrase_for(&self, term: &str) -> Option<&str> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| *key == term)
            .map(|(_, phrase)| phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct Eli5Strategy {
    table: ReplacementTable,
}

impl Eli5Strategy {
    pub fn new(table: ReplacementTable) -> Self {
        Self { table }
    }

    fn key_point(text: &str) -> String {
        match first_terminated_sentence(text) {
            Some(sentence) => sentence,
            None => {
                let trimmed = text.trim();
                let head = truncate_chars(trimmed, KEY_POINT_MAX_CHARS);
                if head.len() < trimmed.len() {
                    format!("{}...", head.trim_end())
                } else {
                    head.to_string()
                }
            }
        }
    }
}

impl RewriteStrategy for Eli5Strategy {
    fn action(&self) -> Action {
        Action::Eli5
    }

    fn rewrite(&self, text: &str) -> Result<RewriteResult> {
        let simplified = self.table.apply(text.trim());
        let key_point = Self::key_point(&simplified);

        let body = format!(
            "{}\n\n{}\n\n💡 Think of it like building with LEGO blocks: \"{}\" is the first piece, and everything else snaps on top of it.",
            PREAMBLE, simplified, key_point
        );

        Ok(RewriteResult::new(Action::Eli5, body))
    }
}
