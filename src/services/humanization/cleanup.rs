// Cleanup
// Final normalization pass run after every transformation. The steps are
// order-dependent: each step's patterns assume the previous step's output.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::error::HumanizeError;
use super::lexicon::{LanguageProcessor, RewriteRule, DASH_MARK, SUBSTITUTION_MARK};
use crate::services::text_processor::{lowercase_first, normalize_whitespace};

/// Never de-capitalized, wherever they appear.
const PROTECTED_WORDS: &[&str] = &["AI", "API", "HTTP", "SQL", "XML", "HTML", "CSS", "JSON", "URL"];

fn space_before_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+([,.;:!?])").expect("space before punctuation regex"))
}

fn dash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[ \t]*(?:[\u{2014}\u{2013}]+|-{2,})[ \t]*|[ \t]+-[ \t]+").expect("dash regex")
    })
}

/// A marked substitution that starts with a capital in the middle of a sentence
fn mid_sentence_capital_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"([\p{{Ll}},;:])([ \t]+){}(\p{{Lu}}[\p{{L}}'\u{{2019}}]*)",
            SUBSTITUTION_MARK
        ))
        .expect("mid-sentence capital regex")
    })
}

/// (pattern, replacement) pairs for punctuation left behind by earlier substitutions
fn artifact_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"\.[ \t]*,", "."),
            (r",[ \t]*\.", "."),
            (r",[ \t]*([!?;:])", "$1"),
            (r",(?:[ \t]*,)+", ","),
            (r"\.{2,}", "."),
            (r"([.!?][ \t]+)[,;:][ \t]*", "$1"),
            (r"\A[\s,;:]+", ""),
            (r"[ \t]+([,.;:!?])", "$1"),
            (r"[ \t]{2,}", " "),
        ]
        .into_iter()
        .map(|(p, r)| (Regex::new(p).expect("artifact regex"), r))
        .collect()
    })
}

fn sentence_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(\A|[.!?]["')]?\s+|\n\n)(\p{Ll})"#).expect("sentence start regex"))
}

fn is_protected(word: &str) -> bool {
    PROTECTED_WORDS.contains(&word) || word == "I" || word.starts_with("I'") || word.starts_with("I\u{2019}")
}

fn apply_rules(text: String, rules: &[RewriteRule]) -> String {
    rules.iter().fold(text, |acc, rule| {
        rule.regex
            .replace_all(&acc, rule.replacement.as_str())
            .into_owned()
    })
}

pub fn intelligent_cleanup(
    text: &str,
    processor: &dyn LanguageProcessor,
    preserve_formatting: bool,
) -> Result<String, HumanizeError> {
    // 1. whitespace
    let mut s = normalize_whitespace(text, preserve_formatting);

    // 2. space before punctuation
    s = space_before_punct_re().replace_all(&s, "$1").into_owned();

    // 3. em/en dashes and spaced hyphens become commas, via DASH_MARK
    let mut mark_buf = [0u8; 4];
    let dash_mark: &str = DASH_MARK.encode_utf8(&mut mark_buf);
    s = dash_re().replace_all(&s, dash_mark).into_owned();

    // 4. compounds split by step 3; every other dash becomes ", "
    s = apply_rules(s, processor.compound_rules()?);
    s = s.replace(DASH_MARK, ", ");

    // 5. doubled connectors ("So, so")
    s = apply_rules(s, processor.connector_rules()?);

    // 6. words capitalized mid-sentence by phrase substitution; marks go away here
    s = mid_sentence_capital_re()
        .replace_all(&s, |caps: &Captures| {
            let word = &caps[3];
            let word = if is_protected(word) { word.to_string() } else { lowercase_first(word) };
            format!("{}{}{}", &caps[1], &caps[2], word)
        })
        .into_owned();
    s = s.replace(SUBSTITUTION_MARK, "");

    // 7. punctuation artifacts
    for (re, replacement) in artifact_rules() {
        s = re.replace_all(&s, *replacement).into_owned();
    }

    // 8. sentence-initial capitals
    s = sentence_start_re()
        .replace_all(&s, |caps: &Captures| format!("{}{}", &caps[1], caps[2].to_uppercase()))
        .into_owned();

    Ok(s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanization::lexicon::EnglishProcessor;

    fn clean(text: &str) -> String {
        intelligent_cleanup(text, &EnglishProcessor, true).unwrap()
    }

    #[test]
    fn test_whitespace_and_space_before_punctuation() {
        assert_eq!(clean("Hello   world , this is  fine ."), "Hello world, this is fine.");
    }

    #[test]
    fn test_dashes_become_commas() {
        assert_eq!(clean("It works \u{2014} mostly."), "It works, mostly.");
        assert_eq!(clean("It works -- mostly."), "It works, mostly.");
    }

    #[test]
    fn test_compound_words_restored_after_dash_step() {
        assert_eq!(
            clean("Good decision\u{2014}making matters for well \u{2013} being."),
            "Good decision-making matters for well-being."
        );
    }

    #[test]
    fn test_doubled_connector_collapsed() {
        assert_eq!(clean("So, So the plan worked."), "So the plan worked.");
    }

    #[test]
    fn test_substituted_capitals_lowered_mid_sentence() {
        let text = format!(
            "{m}Plus, {m}Keep in mind that we agree, {m}Probably. {m}Also fine.",
            m = SUBSTITUTION_MARK
        );
        assert_eq!(clean(&text), "Plus, keep in mind that we agree, probably. Also fine.");
    }

    #[test]
    fn test_author_capitals_untouched() {
        assert_eq!(
            clean("We spent the summer in Long Beach and then drove to Bear Lake with friends."),
            "We spent the summer in Long Beach and then drove to Bear Lake with friends."
        );
        assert_eq!(clean("Plus, Keep calm and the API and I agree."), "Plus, Keep calm and the API and I agree.");
    }

    #[test]
    fn test_mid_sentence_connector_pair_survives() {
        assert_eq!(clean("He told me so, so I went home early."), "He told me so, so I went home early.");
    }

    #[test]
    fn test_comma_separated_compound_parts_survive() {
        assert_eq!(clean("It went well, being the first attempt."), "It went well, being the first attempt.");
    }

    #[test]
    fn test_punctuation_artifacts_removed() {
        assert_eq!(clean("Done., next,, step.. Last ,."), "Done. Next, step. Last.");
    }

    #[test]
    fn test_sentences_recapitalized() {
        assert_eq!(clean("first. second! third? fourth"), "First. Second! Third? Fourth");
    }

    #[test]
    fn test_preserve_formatting_keeps_paragraphs() {
        assert_eq!(clean("one.\n\n\n\ntwo."), "One.\n\nTwo.");
        let flat = intelligent_cleanup("one.\n\ntwo.", &EnglishProcessor, false).unwrap();
        assert_eq!(flat, "One. Two.");
    }
}
