use bizgen_core::logging::init_logging;
use bizgen_llm::{LlmConfig, OpenAIProviderFactory};
use bizgen_pipeline::PipelineConfig;
use bizgen_server::state::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};
use bizgen_server::{local_origins, run_server, AppState};
use clap::Parser;
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "bizgen-server")]
#[command(about = "BizGenerator web UI and API")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8501")]
    port: u16,

    /// Fallback API key used when a request carries none
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// LLM API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// LLM model name
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Sampling temperature for idea generation
    #[arg(long, default_value = "1.0")]
    idea_temperature: f32,

    /// Sampling temperature for STP, plan and critique
    #[arg(long, default_value = "1.0")]
    analysis_temperature: f32,

    /// Maximum completion tokens per request
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Extra browser origin allowed to call the API (repeatable)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// Minutes a session may sit idle before it is dropped
    #[arg(long, default_value_t = DEFAULT_SESSION_TTL.as_secs() / 60)]
    session_ttl_mins: u64,

    /// Maximum number of sessions held in memory
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS)]
    max_sessions: usize,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.log_level.is_some() {
        env_logger::init();
    } else {
        init_logging(if cli.debug { "debug" } else { "info" });
    }

    let llm_config = LlmConfig::from_env()
        .with_base_url(cli.base_url.clone())
        .with_model(cli.model.clone());

    log::info!("LLM Configuration:");
    log::info!("  Base URL: {}", llm_config.base_url);
    log::info!("  Model: {}", llm_config.model);
    log::debug!("  Timeout: {:?}", llm_config.timeout);

    let pipeline_config = PipelineConfig {
        idea_temperature: cli.idea_temperature,
        analysis_temperature: cli.analysis_temperature,
        max_tokens: cli.max_tokens,
    };
    log::debug!("Pipeline configuration: {:?}", pipeline_config);

    let mut origins = local_origins(&cli.host, cli.port);
    origins.extend(cli.allowed_origins.iter().cloned());

    let state = AppState::new(
        Arc::new(OpenAIProviderFactory::new(llm_config)),
        pipeline_config,
        cli.api_key,
    )
    .with_allowed_origins(origins)
    .with_session_limits(
        Duration::from_secs(cli.session_ttl_mins * 60),
        cli.max_sessions,
    );

    run_server(&cli.host, cli.port, state).await
}
