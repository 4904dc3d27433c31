use anyhow::bail;
use bizgen_core::logging::init_logging;
use bizgen_core::{AnalysisKind, BusinessSession, DEFAULT_IDEA_COUNT};
use bizgen_llm::{LlmConfig, OpenAIProviderFactory, ProviderFactory, API_KEY_GUIDANCE};
use bizgen_pipeline::{AnalysisRequest, GenerateIdeasRequest, Pipeline, PipelineConfig};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "bizgen")]
#[command(about = "Sparks new business ideas from a short business context")]
#[command(version)]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// LLM model name
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// LLM API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate business ideas
    Ideas {
        /// Business context, e.g. "a sustainable clothing brand in Thailand"
        #[arg(long)]
        context: String,

        /// Number of ideas to generate (1-5)
        #[arg(long, default_value_t = DEFAULT_IDEA_COUNT)]
        count: u8,
    },
    /// Generate ideas, then STP, plan and critique for the selected ones
    Explore {
        #[arg(long)]
        context: String,

        #[arg(long, default_value_t = DEFAULT_IDEA_COUNT)]
        count: u8,

        /// Idea to analyse (1-based, repeatable). Defaults to every idea.
        #[arg(long = "idea")]
        ideas: Vec<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(if cli.debug { "debug" } else { "warn" });

    let Some(api_key) = cli.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
        eprintln!("{}", API_KEY_GUIDANCE.yellow());
        return Ok(ExitCode::FAILURE);
    };

    let llm_config = LlmConfig::from_env()
        .with_base_url(cli.base_url.clone())
        .with_model(cli.model.clone());
    log::debug!("LLM configuration: {:?}", llm_config);

    let provider = OpenAIProviderFactory::new(llm_config).create(api_key)?;
    let pipeline = Pipeline::new(provider, PipelineConfig::default());

    match cli.command {
        Commands::Ideas { context, count } => {
            generate_ideas(&pipeline, context, count).await?;
        }
        Commands::Explore {
            context,
            count,
            ideas,
        } => {
            check_selection(count, &ideas)?;
            let mut session = generate_ideas(&pipeline, context, count).await?;
            for index in selected_ideas(&session, &ideas) {
                explore_idea(&pipeline, &mut session, index).await?;
            }
        }
    }

    println!();
    println!(
        "{}",
        "Feel free to explore more business ideas and refine your concepts!".cyan()
    );
    Ok(ExitCode::SUCCESS)
}

async fn generate_ideas(
    pipeline: &Pipeline,
    context: String,
    count: u8,
) -> anyhow::Result<BusinessSession> {
    println!("{}", "Generating ideas...".dimmed());

    let start = Instant::now();
    let session = pipeline
        .generate_ideas(GenerateIdeasRequest::new(context, count))
        .await?;
    log::debug!(
        "Generated {} ideas in {:?}",
        session.ideas().len(),
        start.elapsed()
    );

    println!("{}", "Business Ideas Generated".cyan().bold());
    println!("{}", "─".repeat(50).dimmed());
    for idea in session.ideas() {
        println!("{}", format!("Business {}", idea.index).green().bold());
        println!("{}", idea.text);
        println!();
    }

    Ok(session)
}

async fn explore_idea(
    pipeline: &Pipeline,
    session: &mut BusinessSession,
    index: usize,
) -> anyhow::Result<()> {
    println!("{}", "─".repeat(50).dimmed());

    for kind in AnalysisKind::ALL {
        print!("{}", format!("Generating {}...", kind.label()).dimmed());
        std::io::stdout().flush()?;

        let analysis = pipeline
            .generate_analysis(session, AnalysisRequest::new(index, kind))
            .await?;

        println!();
        println!(
            "{}",
            format!("{} for Business {}", kind.label(), index)
                .yellow()
                .bold()
        );
        println!("{}", analysis.text);
        println!();
    }

    Ok(())
}

/// Fails on `--idea` values that cannot exist among `count` ideas, before any call is made.
fn check_selection(count: u8, requested: &[usize]) -> anyhow::Result<()> {
    let unknown: Vec<String> = requested
        .iter()
        .filter(|index| **index == 0 || **index > count as usize)
        .map(|index| index.to_string())
        .collect();

    if !unknown.is_empty() {
        bail!(
            "--idea {} out of range: only {} ideas will be generated",
            unknown.join(", "),
            count
        );
    }
    Ok(())
}

/// Ideas to explore, in request order without repeats. An empty request means all.
fn selected_ideas(session: &BusinessSession, requested: &[usize]) -> Vec<usize> {
    if requested.is_empty() {
        return session.ideas().iter().map(|idea| idea.index).collect();
    }

    let mut selected = Vec::with_capacity(requested.len());
    for index in requested {
        if !selected.contains(index) {
            selected.push(*index);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizgen_core::{Idea, UserContext};

    fn session_with(count: usize) -> BusinessSession {
        BusinessSession::new(
            UserContext::new("bakery").unwrap(),
            (1..=count)
                .map(|i| Idea::new(i, format!("idea {}", i)))
                .collect(),
        )
    }

    #[test]
    fn explore_defaults_to_every_idea() {
        assert_eq!(selected_ideas(&session_with(3), &[]), vec![1, 2, 3]);
    }

    #[test]
    fn explore_keeps_request_order_and_drops_repeats() {
        assert_eq!(selected_ideas(&session_with(3), &[3, 1, 3]), vec![3, 1]);
    }

    #[test]
    fn selection_within_count_is_accepted() {
        assert!(check_selection(3, &[]).is_ok());
        assert!(check_selection(3, &[1, 3]).is_ok());
    }

    #[test]
    fn selection_beyond_count_is_rejected() {
        let err = check_selection(2, &[9, 1, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--idea 9, 0 out of range: only 2 ideas will be generated"
        );
    }

    #[test]
    fn parses_explore_command() {
        let cli = Cli::try_parse_from([
            "bizgen",
            "--api-key",
            "sk-test",
            "explore",
            "--context",
            "surf school in Bali",
            "--count",
            "2",
            "--idea",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("sk-test"));
        match cli.command {
            Commands::Explore {
                context,
                count,
                ideas,
            } => {
                assert_eq!(context, "surf school in Bali");
                assert_eq!(count, 2);
                assert_eq!(ideas, vec![2]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn ideas_count_defaults_to_five() {
        let cli = Cli::try_parse_from(["bizgen", "ideas", "--context", "bakery"]).unwrap();

        match cli.command {
            Commands::Ideas { count, .. } => assert_eq!(count, 5),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
