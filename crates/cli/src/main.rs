//! lawabbr CLI - abbreviation extraction benchmark for Japanese legal text
//!
//! This binary provides the command-line interface for running extraction
//! passes and scoring their results.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use lawabbr::{load_config, render_messages, ConfigOverrides};
use lawabbr_checkpoint::CheckpointStore;
use lawabbr_core::{load_dataset, FewShotType, ModelName};
use lawabbr_extraction::{create_completion_provider, ExtractionClient, ExtractionSettings};
use lawabbr_runner::{rescore, BatchDriver, RunSummary};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "lawabbr")]
#[command(about = "Extract and score abbreviation definitions in Japanese legal text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pairs for every dataset item not yet recorded, then score
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Do not draw a progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Score recorded results without calling the model
    Score {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Print the messages that would be sent for one excerpt
    Prompt {
        /// Model (o1-mini, gpt-4o-mini)
        #[arg(short, long)]
        model: Option<ModelName>,

        /// Few-shot variant (none, nakamura, our)
        #[arg(short, long)]
        few_shot: Option<FewShotType>,

        /// Excerpt text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// File holding the excerpt text
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

/// Selects the configuration a pass runs against
#[derive(Args, Debug, Default)]
struct TargetArgs {
    /// Model (o1-mini, gpt-4o-mini)
    #[arg(short, long)]
    model: Option<ModelName>,

    /// Few-shot variant (none, nakamura, our)
    #[arg(short, long)]
    few_shot: Option<FewShotType>,

    /// Annotated dataset file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory for result files
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl From<TargetArgs> for ConfigOverrides {
    fn from(args: TargetArgs) -> Self {
        Self {
            model: args.model,
            few_shot: args.few_shot,
            input_file: args.input,
            output_dir: args.output_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            target,
            no_progress,
        } => run(cli.config.as_deref(), target.into(), !no_progress).await,
        Commands::Score { target } => score(cli.config.as_deref(), target.into()),
        Commands::Prompt {
            model,
            few_shot,
            text,
            file,
        } => {
            let overrides = ConfigOverrides {
                model,
                few_shot,
                ..ConfigOverrides::default()
            };
            prompt(cli.config.as_deref(), overrides, text, file.as_deref())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("lawabbr={level}"))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Run one extraction pass against the configured checkpoint
async fn run(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    progress: bool,
) -> Result<()> {
    let config = load_config(config_path, &overrides)?;
    debug!("Configuration: {config:?}");

    let items = load_dataset(&config.paths.input_file)?;
    let output = config.output_path();
    info!(
        "Model {} with few-shot '{}': {} items, results in {}",
        config.llm.model,
        config.extraction.few_shot,
        items.len(),
        output.display()
    );

    let mut store = CheckpointStore::open(&output)?;
    let provider = create_completion_provider(&config.llm)
        .context("Failed to create completion provider")?;
    let client = ExtractionClient::new(provider, ExtractionSettings::from_config(&config));

    let summary = BatchDriver::new(&client, &mut store)
        .with_progress(progress)
        .run(&items)
        .await?;

    print_summary(&summary, &output);
    Ok(())
}

/// Score recorded results only
fn score(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<()> {
    let config = load_config(config_path, &overrides)?;
    let items = load_dataset(&config.paths.input_file)?;
    let output = config.output_path();

    if !output.exists() {
        bail!(
            "No results found at {}.\nRun 'lawabbr run' with the same model and few-shot variant first.",
            output.display()
        );
    }

    let store = CheckpointStore::open(&output)?;
    let summary = rescore(&items, &store);

    print_summary(&summary, &output);
    Ok(())
}

/// Print the rendered request for one excerpt
fn prompt(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    text: Option<String>,
    file: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path, &overrides)?;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Either --text or --file is required"),
    };

    let messages = lawabbr_extraction::prompts::build_messages(
        &text,
        config.extraction.few_shot,
        config.llm.uses_system_role(),
    );
    print!("{}", render_messages(&messages));
    Ok(())
}

fn print_summary(summary: &RunSummary, output: &Path) {
    println!();
    println!("{}", summary.report);
    println!();
    println!("Results: {}", output.display());
    println!(
        "Items: {} extracted, {} reused, {} failed, {} missing",
        summary.extracted,
        summary.reused,
        summary.failed.len(),
        summary.missing
    );
    if !summary.failed.is_empty() {
        println!("Failed items (rerun to retry): {}", summary.failed.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "lawabbr",
            "run",
            "-m",
            "o1-mini",
            "-f",
            "nakamura",
            "--input",
            "data.json",
            "--no-progress",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                target,
                no_progress,
            } => {
                assert!(no_progress);
                let overrides = ConfigOverrides::from(target);
                assert_eq!(overrides.model, Some(ModelName::O1Mini));
                assert_eq!(overrides.few_shot, Some(FewShotType::Nakamura));
                assert_eq!(overrides.input_file, Some(PathBuf::from("data.json")));
                assert_eq!(overrides.output_dir, None);
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_score_without_flags() {
        let cli = Cli::try_parse_from(["lawabbr", "score", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Score { .. }));
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["lawabbr", "run", "-m", "gpt-5"]).is_err());
    }

    #[test]
    fn test_unknown_few_shot_rejected() {
        assert!(Cli::try_parse_from(["lawabbr", "run", "-f", "zero"]).is_err());
    }

    #[test]
    fn test_prompt_requires_text_or_file() {
        assert!(Cli::try_parse_from(["lawabbr", "prompt"]).is_err());
        assert!(Cli::try_parse_from(["lawabbr", "prompt", "--text", "a", "--file", "b"]).is_err());
        assert!(Cli::try_parse_from(["lawabbr", "prompt", "--text", "本文"]).is_ok());
    }
}
