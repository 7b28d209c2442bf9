use anyhow::{bail, Context, Result};
use clearify_lib::services::config_store::{ConfigStore, HumanizerSettings};
use clearify_lib::services::humanization::{Humanizer, HumanizerEvaluator};
use clearify_lib::services::text_processor::normalize_punctuation;
use std::io::Read;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin failed")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("read file failed: {}", path))
}

/// Stored settings when available, defaults otherwise.
fn load_settings() -> HumanizerSettings {
    ConfigStore::default_config_dir()
        .map(ConfigStore::new)
        .and_then(|store| store.humanizer_settings().ok())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  humanize <path|-> [--intensity <0..1>] [--seed <n>] [--evaluate] [--out <json_path>]\n\nNotes:\n  - Use `-` to read the text from stdin.\n  - Without --seed the output varies between runs."
        );
        return Ok(());
    }

    clearify_lib::init_logging();

    let mut settings = load_settings();
    let intensity = match parse_arg_value(&args, "--intensity") {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("invalid --intensity: {}", raw))?,
        None => settings.default_intensity,
    };
    if !(0.0..=1.0).contains(&intensity) {
        bail!("--intensity must be within [0, 1], got {}", intensity);
    }
    if let Some(raw) = parse_arg_value(&args, "--seed") {
        settings.seed = Some(raw.parse().with_context(|| format!("invalid --seed: {}", raw))?);
    }
    let evaluate = has_flag(&args, "--evaluate");
    let out_path = parse_arg_value(&args, "--out");

    let input = read_input(&args[1])?;
    let mut humanizer = Humanizer::with_settings(&settings);
    let mut result = humanizer.humanize(&normalize_punctuation(&input), intensity);
    // Report against the text exactly as it was read
    result.original = input;

    println!("{}", result.humanized);
    println!();
    println!("Modifications: {}", result.modifications_applied);
    println!("Words rewritten: {}", result.words_rewritten);
    println!("Already human: {}", result.was_already_human);
    if let Some(analysis) = &result.analysis {
        println!(
            "Tone: {} (formality {:.1}, technical {:.1})",
            analysis.target_tone.as_str(),
            analysis.formality_score,
            analysis.technical_score
        );
    }
    let m = &result.quality_metrics;
    println!(
        "Quality: vocab change {:.2}, burstiness {:+.2}, length {:+.1}%, tone preserved {}, readable {}",
        m.vocabulary_change_ratio,
        m.burstiness_increase,
        m.length_change_percent,
        m.tone_preserved,
        m.readability_maintained
    );
    if let Some(err) = &result.error {
        println!("Fallback: {}", err);
    }

    if evaluate {
        let cmp = HumanizerEvaluator::new().compare_versions(&result.original, &result.humanized);
        println!(
            "Evasion score: {:.1} -> {:.1} ({:+.1}, {}); risk {:?} -> {:?}",
            cmp.original.evasion_score,
            cmp.humanized.evasion_score,
            cmp.improvement,
            cmp.recommendation,
            cmp.original.detection_risk,
            cmp.humanized.detection_risk
        );
        for issue in &cmp.humanized.issues_found {
            println!("  remaining: {} x{} ({:.1})", issue.description, issue.occurrences, issue.penalty);
        }
    }

    if let Some(out) = out_path {
        let json = serde_json::to_string_pretty(&result).context("serialize result failed")?;
        std::fs::write(&out, json).with_context(|| format!("write {} failed", out))?;
        println!("Wrote {}", out);
    }

    Ok(())
}
