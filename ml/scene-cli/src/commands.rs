//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scene_dataset::{CorpusConfig, Scene, SceneCorpus, SplitRatios};
use scene_types::MatchMode;
use tracing::info;

/// Longest description prefix shown in listings.
const DESCRIPTION_PREVIEW: usize = 50;

fn load(config: &CorpusConfig) -> Result<SceneCorpus> {
    config
        .load()
        .with_context(|| format!("failed to load corpus from {}", config.data_path.display()))
}

fn preview(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_PREVIEW {
        text.chars().take(DESCRIPTION_PREVIEW).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

fn print_scenes(scenes: &[Scene<'_>]) {
    for (token, record) in scenes {
        println!(
            "  {}: [{}] - {}",
            token.cyan(),
            record.labels.join(", "),
            preview(&record.description)
        );
    }
}

pub fn stats(config: &CorpusConfig, json: bool) -> Result<()> {
    let corpus = load(config)?;
    let summary = corpus.summary();

    if json {
        let report =
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{report}");
        return Ok(());
    }

    print!("{}", summary.to_report());
    let unknown = summary.unknown_labels();
    if !unknown.is_empty() {
        println!(
            "{} labels outside the vocabulary: {}",
            "warning:".yellow().bold(),
            unknown.join(", ")
        );
    }
    Ok(())
}

pub fn query(config: &CorpusConfig, labels: &[String], mode: MatchMode) -> Result<()> {
    let corpus = load(config)?;
    let scenes = corpus.scenes_by_labels(labels, mode)?;

    println!(
        "{} {} scenes matching {} of [{}]",
        "Found".green().bold(),
        scenes.len(),
        mode,
        labels.join(", ")
    );
    print_scenes(&scenes);
    Ok(())
}

pub fn sample(config: &CorpusConfig, n: Option<usize>, seed: Option<u64>) -> Result<()> {
    let corpus = load(config)?;
    let scenes = corpus.sample(n.unwrap_or(config.sample_size), seed.or(config.seed));

    println!("{} {} scenes:", "Sampled".green().bold(), scenes.len());
    print_scenes(&scenes);
    Ok(())
}

/// Fills ratios missing on the command line from the config.
fn resolve_ratios(
    config: &CorpusConfig,
    (train, val, test): (Option<f64>, Option<f64>, Option<f64>),
) -> Result<SplitRatios> {
    if train.is_none() && val.is_none() && test.is_none() {
        return Ok(config.ratios);
    }
    let ratios = SplitRatios::new(
        train.unwrap_or(config.ratios.train_ratio()),
        val.unwrap_or(config.ratios.val_ratio()),
        test.unwrap_or(config.ratios.test_ratio()),
    )?;
    Ok(ratios)
}

pub fn split(
    config: &CorpusConfig,
    ratios: (Option<f64>, Option<f64>, Option<f64>),
    seed: Option<u64>,
    out: Option<&Path>,
) -> Result<()> {
    let ratios = resolve_ratios(config, ratios)?;
    let corpus = load(config)?;
    let split = corpus.split_with(ratios, seed.or(config.seed));
    let (n_train, n_val, n_test) = split.sizes();

    println!(
        "{} Train={n_train}, Val={n_val}, Test={n_test}",
        "Dataset split:".green().bold()
    );

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        for (name, tokens) in [("train", &split.train), ("val", &split.val), ("test", &split.test)] {
            let path = dir.join(format!("{name}.json"));
            corpus.export_labels_only(&path, Some(tokens.as_slice()))?;
        }
        info!("Wrote split label files to {}", dir.display());
    }
    Ok(())
}

pub fn export(config: &CorpusConfig, out: &Path, tokens: Option<&[String]>) -> Result<()> {
    let corpus = load(config)?;
    let written = corpus.export_labels_only(out, tokens)?;

    println!(
        "{} labels for {written} scenes to {}",
        "Exported".green().bold(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_ratios_uses_config_by_default() {
        let config =
            CorpusConfig::default().with_ratios(SplitRatios::SEVENTY_FIFTEEN_FIFTEEN);
        let ratios = resolve_ratios(&config, (None, None, None)).ok();
        assert_eq!(ratios, Some(SplitRatios::SEVENTY_FIFTEEN_FIFTEEN));
    }

    #[test]
    fn resolve_ratios_fills_missing_from_config() {
        let config = CorpusConfig::default();
        let ratios = resolve_ratios(&config, (Some(0.7), Some(0.2), None)).ok();
        assert_eq!(ratios, SplitRatios::new(0.7, 0.2, 0.1).ok());
    }

    #[test]
    fn resolve_ratios_rejects_bad_sum() {
        let config = CorpusConfig::default();
        assert!(resolve_ratios(&config, (Some(0.9), None, None)).is_err());
    }

    #[test]
    fn preview_truncates_long_descriptions() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(DESCRIPTION_PREVIEW + 5);
        assert_eq!(preview(&long).chars().count(), DESCRIPTION_PREVIEW + 3);
    }
}
