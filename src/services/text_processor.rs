// Text Processing Service
// Sentence splitting, tokenization and casing helpers shared by the humanization pipeline

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Abbreviations whose trailing period does not end a sentence (compared lowercase).
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "no", "fig",
    "e.g", "i.e", "approx",
];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['\u{2019}-][\p{L}\p{N}]+)*").expect("word regex")
    })
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B\u{00A0}\u{3000}]+").expect("horizontal whitespace regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank lines regex"))
}

fn any_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Normalize typographic quotes and exotic spaces before processing
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace('\u{201c}', "\"")
        .replace('\u{201d}', "\"")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    horizontal_ws_re().replace_all(&s, " ").trim().to_string()
}

/// Collapse whitespace. With `preserve_formatting` line breaks survive
/// (at most one blank line between paragraphs); otherwise everything
/// becomes single spaces.
pub fn normalize_whitespace(text: &str, preserve_formatting: bool) -> String {
    if !preserve_formatting {
        return any_ws_re().replace_all(text, " ").trim().to_string();
    }

    let collapsed = horizontal_ws_re().replace_all(text, " ");
    let lines = collapsed
        .split('\n')
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n");
    blank_lines_re().replace_all(&lines, "\n\n").trim().to_string()
}

/// Word tokens (letters/digits with inner apostrophes or hyphens)
pub fn word_tokens(text: &str) -> Vec<&str> {
    word_re().find_iter(text).map(|m| m.as_str()).collect()
}

fn is_abbreviation(before: &str) -> bool {
    let last = before
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if last.is_empty() {
        return false;
    }

    let mut chars = last.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        // Single capital letter: initials such as "J. Smith"
        if first.is_uppercase() {
            return true;
        }
    }

    let lower = last.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<Range<usize>>) {
    if start >= end {
        return;
    }
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trimmed_len = slice.trim().len();
    if trimmed_len > 0 {
        spans.push(start + lead..start + lead + trimmed_len);
    }
}

/// Byte ranges of sentences in `text`, trimmed of surrounding whitespace.
///
/// `.`, `!` and `?` end a sentence when followed by whitespace; a blank line
/// ends one too. Periods after known abbreviations and single capitals are
/// skipped. This is a heuristic: decimals with trailing spaces, unusual
/// abbreviations and initials can still mis-split, which only affects
/// statistics and the per-sentence passes.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < len {
        let b = bytes[i];

        if matches!(b, b'.' | b'!' | b'?') {
            let mut end = i + 1;
            while end < len && matches!(bytes[end], b'.' | b'!' | b'?') {
                end += 1;
            }
            while end < len && matches!(bytes[end], b'"' | b'\'' | b')') {
                end += 1;
            }
            let at_break = end >= len || bytes[end].is_ascii_whitespace();
            if at_break && !(b == b'.' && end == i + 1 && is_abbreviation(&text[start..i])) {
                push_trimmed(text, start, end, &mut spans);
                start = end;
            }
            i = end;
            continue;
        }

        if b == b'\n' {
            let mut j = i + 1;
            while j < len && bytes[j].is_ascii_whitespace() && bytes[j] != b'\n' {
                j += 1;
            }
            if j < len && bytes[j] == b'\n' {
                push_trimmed(text, start, i, &mut spans);
                start = i;
            }
        }

        i += 1;
    }

    push_trimmed(text, start, len, &mut spans);
    spans
}

/// Sentences of `text` as borrowed slices
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text).into_iter().map(|r| &text[r]).collect()
}

/// Rewrite each sentence with `f`, keeping the whitespace between sentences intact.
pub fn rewrite_sentences<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in sentence_spans(text) {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&f(&text[span.clone()]));
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Non-empty paragraphs separated by blank lines
pub fn count_paragraphs(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            count += 1;
            in_paragraph = true;
        }
    }
    count
}

/// Population variance of sentence lengths measured in words
pub fn sentence_length_variance(text: &str) -> f64 {
    let lengths: Vec<f64> = split_sentences(text)
        .iter()
        .map(|s| word_tokens(s).len() as f64)
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map_or(false, |c| c.is_uppercase())
}
