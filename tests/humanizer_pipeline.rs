use clearify_lib::models::TargetTone;
use clearify_lib::services::humanization::{
    intelligent_cleanup, EnglishProcessor, Humanizer, HumanizerEvaluator, TextAnalyzer,
};
use clearify_lib::services::text_processor::split_sentences;
use regex::Regex;

const ROBOTIC: &str = "Furthermore, it is important to note that the implementation of robust methodologies is essential. Moreover, the utilization of comprehensive frameworks facilitates substantial improvements.";

const CHATTY: &str = "Honestly, I can't believe how fun our trip was! My kids loved the beach and we're totally going back next summer. It was awesome, yeah.";

const NEUTRAL_PROSE: &str = "The town library reopened last spring after a long renovation. Visitors now find brighter reading rooms, a small café near the entrance and a quiet study area on the second floor. The children's section moved downstairs, which parents seem to like. Staff members say that attendance has grown in a significant way since the doors opened again. Evening events are also busier than before, especially the monthly book club. Some residents still miss the old wooden shelves, but most agree that the building feels more welcoming. It is not perfect, and the parking lot is still too small for busy weekends.";

const THE_RUN: &str = "The server handles requests. The cache stores results. The database keeps records. The scheduler runs jobs. The monitor reports errors.";

const HUMAN_WITH_NAMES: &str = "Honestly, we had a blast! My sister and I drove from Long Beach to Bear Lake, and it was awesome. We saw so, so many pine trees, yeah. We're totally going back.";

const AI_ESSAY: &str = "In today's digital world, teams rely on software every day. It is worth noting that the optimization of workflows matters. Additionally, numerous companies leverage automation. Consequently, productivity rises. In conclusion, the evaluation of tools should be continuous.";

#[test]
fn test_short_inputs_are_untouched() {
    let mut humanizer = Humanizer::with_seed(1);
    for text in ["", "hi", "  short  ", "Moreover!"] {
        let result = humanizer.humanize(text, 1.0);
        assert_eq!(result.humanized, text);
        assert_eq!(result.modifications_applied, 0);
    }
}

#[test]
fn test_same_seed_same_output() {
    for seed in [0, 7, 42, 1234] {
        let a = Humanizer::with_seed(seed).humanize(AI_ESSAY, 0.8);
        let b = Humanizer::with_seed(seed).humanize(AI_ESSAY, 0.8);
        assert_eq!(a.humanized, b.humanized);
        assert_eq!(a.modifications_applied, b.modifications_applied);
        assert_eq!(a.words_rewritten, b.words_rewritten);
    }
}

#[test]
fn test_already_human_text_is_touched_less() {
    let analyzer = TextAnalyzer::new();
    let chatty = analyzer.analyze(CHATTY);
    let robotic = analyzer.analyze(ROBOTIC);
    assert!(chatty.is_already_human);
    assert!(!robotic.is_already_human);

    let humanizer = Humanizer::with_seed(3);
    for intensity in [0.0, 0.25, 0.6, 1.0] {
        let config = humanizer.effective_config(&chatty, intensity);
        assert!(config.synonym_replacement <= 0.12 * intensity * 0.15 + 1e-12);
    }

    for seed in 0..5 {
        let human = Humanizer::with_seed(seed).humanize(CHATTY, 1.0);
        let machine = Humanizer::with_seed(seed).humanize(ROBOTIC, 1.0);
        assert!(human.was_already_human);
        assert!(human.modifications_applied < machine.modifications_applied);
    }
}

#[test]
fn test_cleanup_leaves_no_artifacts() {
    let doubled = Regex::new(r",,|\.\.").unwrap();
    let space_before = Regex::new(r"[ \t][,.;:!?]").unwrap();
    let lower_after_boundary = Regex::new(r"[.!?]\s+\p{Ll}").unwrap();

    let messy = "so, so the plan worked .. it was fine ,, really — mostly. decision — making is hard!yes";
    let mut outputs = vec![intelligent_cleanup(messy, &EnglishProcessor, true).unwrap()];
    for seed in 0..8 {
        for text in [ROBOTIC, AI_ESSAY, NEUTRAL_PROSE] {
            outputs.push(Humanizer::with_seed(seed).humanize(text, 1.0).humanized);
        }
    }

    for out in &outputs {
        assert!(!doubled.is_match(out), "doubled punctuation in {:?}", out);
        assert!(!space_before.is_match(out), "space before punctuation in {:?}", out);
        assert!(!lower_after_boundary.is_match(out), "lowercase sentence start in {:?}", out);
    }
}

#[test]
fn test_furthermore_lowers_evaluator_score() {
    let evaluator = HumanizerEvaluator::new();
    let base = "The plan works. The team is happy. The budget holds.";
    let with = "Furthermore, the plan works. Furthermore, the team is happy. Furthermore, the budget holds.";
    let clean = evaluator.evaluate_ai_detection_evasion(base).evasion_score;
    let flagged = evaluator.evaluate_ai_detection_evasion(with).evasion_score;
    assert!(flagged < clean);
}

#[test]
fn test_end_to_end_robotic_paragraph() {
    let mut humanizer = Humanizer::with_seed(2024);
    let result = humanizer.humanize(ROBOTIC, 0.6);

    // (a) phrase patterns removed
    assert!(!result.humanized.contains("Furthermore"));
    assert!(!result.humanized.contains("It is important to note that"));
    assert!(!result.humanized.to_lowercase().contains("it is important to note that"));

    // (b) no two consecutive sentences opening with "The"
    let sentences = split_sentences(&result.humanized);
    for pair in sentences.windows(2) {
        assert!(!(pair[0].starts_with("The ") && pair[1].starts_with("The ")));
    }

    // (c) every stage ran
    assert!(!result.was_already_human);
    assert!(result.modifications_applied >= 5, "only {} modifications", result.modifications_applied);
    assert!(result.error.is_none());

    // (d) evaluator sees an improvement
    let comparison = HumanizerEvaluator::new().compare_versions(&result.original, &result.humanized);
    assert!(comparison.improvement > 0.0);
}

#[test]
fn test_robotic_paragraph_across_seeds() {
    for seed in 0..8 {
        let result = Humanizer::with_seed(seed).humanize(ROBOTIC, 0.6);
        assert!(!result.humanized.contains('\u{FDD0}'), "substitution mark left in {:?}", result.humanized);
        assert!(!result.humanized.contains('\u{FDD1}'), "dash mark left in {:?}", result.humanized);
        assert!(!result.humanized.to_lowercase().contains("furthermore"));
        assert_eq!(result.original, ROBOTIC);
        // two phrase swaps and two nominal rewrites never depend on the draw
        assert!(result.modifications_applied >= 4);
        let sentences = split_sentences(&result.humanized);
        for pair in sentences.windows(2) {
            assert!(!(pair[0].starts_with("The ") && pair[1].starts_with("The ")));
        }
    }
}

#[test]
fn test_third_sentence_starting_with_the_is_varied() {
    for seed in 0..5 {
        let result = Humanizer::with_seed(seed).humanize(THE_RUN, 0.6);
        assert!(!result.was_already_human);
        let sentences = split_sentences(&result.humanized);
        assert_eq!(sentences.len(), 5);
        assert!(sentences[2].starts_with("Database"), "got {:?}", sentences[2]);
        for run in sentences.windows(3) {
            assert!(!run.iter().all(|s| s.starts_with("The ")), "three in a row: {:?}", run);
        }
        assert!(result.modifications_applied >= 1);
    }
}

#[test]
fn test_human_text_keeps_its_own_words() {
    for seed in 0..5 {
        let result = Humanizer::with_seed(seed).humanize(HUMAN_WITH_NAMES, 1.0);
        assert!(result.was_already_human);
        assert_eq!(result.humanized, HUMAN_WITH_NAMES);
    }
}

#[test]
fn test_neutral_prose_keeps_its_length() {
    for seed in 0..10 {
        let result = Humanizer::with_seed(seed).humanize(NEUTRAL_PROSE, 0.6);
        assert!(
            result.quality_metrics.readability_maintained,
            "length changed by {:.1}% with seed {}",
            result.quality_metrics.length_change_percent,
            seed
        );
    }
}

#[test]
fn test_empty_analysis_is_neutral() {
    let analysis = TextAnalyzer::new().analyze("");
    assert_eq!(analysis.target_tone, TargetTone::Neutral);
    assert_eq!(analysis.word_count, 0);
    assert_eq!(analysis.sentence_count, 0);
    assert_eq!(analysis.paragraph_count, 0);
    assert_eq!(analysis.avg_sentence_length, 0.0);
    assert_eq!(analysis.technical_score, 0.0);
}

#[test]
fn test_result_serializes_camel_case() {
    let result = Humanizer::with_seed(5).humanize(ROBOTIC, 0.6);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("modificationsApplied").is_some());
    assert!(json.get("wasAlreadyHuman").is_some());
    assert_eq!(json["analysis"]["targetTone"], "formal");
    assert!(json.get("error").is_none());
}
