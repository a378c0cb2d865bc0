use crate::core::{Action, RewriteResult, RewriteStrategy, SentenceScore};
use crate::utils::error::{Result, SimplifierError};
use crate::utils::text::{split_sentences, word_count};

pub const FIRST_SENTENCE_BONUS: i32 = 10;
pub const KEYWORD_WEIGHT: i32 = 2;
pub const DEFAULT_MAX_SENTENCES: usize = 2;
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// 唯一採用的關鍵字集合（小寫，子字串匹配）
pub const SUMMARY_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "must",
    "enables",
    "allows",
    "provides",
    "essential",
    "main",
    "primary",
    "required",
    "should",
    "note",
];

pub struct TldrStrategy {
    max_sentences: usize,
    words_per_minute: u32,
}

impl TldrStrategy {
    pub fn new(max_sentences: usize, words_per_minute: u32) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
            words_per_minute: words_per_minute.max(1),
        }
    }

    pub fn score_sentences(sentences: &[String]) -> Vec<SentenceScore> {
        sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let lower = sentence.to_lowercase();
                let keyword_hits: usize = SUMMARY_KEYWORDS
                    .iter()
                    .map(|keyword| lower.matches(keyword).count())
                    .sum();
                let bonus = if index == 0 { FIRST_SENTENCE_BONUS } else { 0 };

                SentenceScore {
                    index,
                    sentence: sentence.clone(),
                    score: bonus + KEYWORD_WEIGHT * keyword_hits as i32,
                }
            })
            .collect()
    }

    /// 取分數最高的 N 句，同分以原始位置先者優先，最後依原始順序輸出。
    pub fn select(&self, mut scored: Vec<SentenceScore>) -> Vec<SentenceScore> {
        scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
        scored.truncate(self.max_sentences);
        scored.sort_by_key(|s| s.index);
        scored
    }

    fn reading_stats(&self, original_words: usize, summary_words: usize) -> String {
        let saved_words = original_words.saturating_sub(summary_words);
        let saved_seconds =
            (saved_words as f64 / self.words_per_minute as f64 * 60.0).round() as u64;

        format!(
            "📊 Original: {} words · Summary: {} words · ~{}s reading time saved",
            original_words, summary_words, saved_seconds
        )
    }
}

impl Default for TldrStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SENTENCES, DEFAULT_WORDS_PER_MINUTE)
    }
}

impl RewriteStrategy for TldrStrategy {
    fn action(&self) -> Action {
        Action::Tldr
    }

    fn rewrite(&self, text: &str) -> Result<RewriteResult> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(SimplifierError::processing("no sentences to summarize"));
        }

        let selected = self.select(Self::score_sentences(&sentences));
        tracing::debug!(
            "TLDR picked {} of {} sentences (indices {:?})",
            selected.len(),
            sentences.len(),
            selected.iter().map(|s| s.index).collect::<Vec<_>>()
        );

        let summary = selected
            .iter()
            .map(|s| s.sentence.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let stats = self.reading_stats(word_count(text), word_count(&summary));

        Ok(RewriteResult::new(Action::Tldr, summary).with_details(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_is_returned_trimmed() {
        let result = TldrStrategy::default()
            .rewrite("  JavaScript is an interpreted programming language.  ")
            .unwrap();
        assert_eq!(result.title, "TLDR Summary");
        assert_eq!(result.body, "JavaScript is an interpreted programming language.");
        assert!(result.details.unwrap().contains("Original: 6 words"));
    }

    #[test]
    fn test_scoring_rewards_first_sentence_and_keywords() {
        let sentences = vec![
            "Intro here.".to_string(),
            "This is important and key.".to_string(),
            "Nothing special.".to_string(),
        ];
        let scores = TldrStrategy::score_sentences(&sentences);
        assert_eq!(scores[0].score, FIRST_SENTENCE_BONUS);
        assert_eq!(scores[1].score, 2 * KEYWORD_WEIGHT);
        assert_eq!(scores[2].score, 0);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let scores = TldrStrategy::score_sentences(&[
            "x.".to_string(),
            "It ENABLES the Keyboard.".to_string(),
        ]);
        // "enables" + "key"（keyboard 內的子字串）
        assert_eq!(scores[1].score, 2 * KEYWORD_WEIGHT);
    }

    #[test]
    fn test_selection_keeps_original_order() {
        let text = "Plain opener. Filler line. You must note this important part.";
        let result = TldrStrategy::default().rewrite(text).unwrap();
        assert_eq!(result.body, "Plain opener. You must note this important part.");
    }

    #[test]
    fn test_ties_break_by_original_position() {
        let text = "Opening line. First tie. Second tie. Third tie.";
        let result = TldrStrategy::new(3, 200).rewrite(text).unwrap();
        assert_eq!(result.body, "Opening line. First tie. Second tie.");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let text = "The API is key. It enables apps. It must be stable. Docs provide examples. Important note.";
        let strategy = TldrStrategy::default();
        let first = strategy.rewrite(text).unwrap();
        for _ in 0..5 {
            assert_eq!(strategy.rewrite(text).unwrap(), first);
        }
    }

    #[test]
    fn test_reading_stats_uses_words_per_minute() {
        let strategy = TldrStrategy::new(1, 100);
        assert_eq!(
            strategy.reading_stats(150, 50),
            "📊 Original: 150 words · Summary: 50 words · ~60s reading time saved"
        );
    }
}
