//! 文字處理共用函式：斷句、字數統計、安全截斷。

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

fn is_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

/// 以 `.`、`!`、`?` 斷句。
///
/// 每個句子包含其結尾的標點（連續標點如 `?!` 視為同一個結尾），並去除前後空白。
/// 沒有結尾標點的尾段仍保留為最後一句。若沒有任何句子（例如全是標點），
/// 整段去空白後的文字視為一句；只有空白時回傳空陣列。
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if is_terminator(c) {
            while let Some(&next) = chars.peek() {
                if !is_terminator(next) {
                    break;
                }
                current.push(next);
                chars.next();
            }
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);

    if sentences.is_empty() {
        let whole = text.trim();
        if !whole.is_empty() {
            sentences.push(whole.to_string());
        }
    }

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    // 只有標點的片段不算句子
    if trimmed.chars().any(|c| !is_terminator(c)) {
        sentences.push(trimmed.to_string());
    }
}

/// 第一個以標點結尾的句子；開頭只有標點的片段會略過。
/// 若全文沒有這樣的句子則回傳 `None`。
pub fn first_terminated_sentence(text: &str) -> Option<String> {
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if !is_terminator(c) {
            continue;
        }
        let end = idx + c.len_utf8();
        let sentence = text[start..end].trim();
        if sentence.chars().any(|ch| !is_terminator(ch)) {
            return Some(sentence.to_string());
        }
        start = end;
    }
    None
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 依字元（非位元組）截斷，不會切在 UTF-8 字元中間。
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
