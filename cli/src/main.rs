//! CLI entrypoint for disagree-commit
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    DebateConfig, DebateMemory, LlmGateway, PanelModels, RunDebateInput, RunDebateUseCase,
};
use debate_domain::{DebateReport, Model, OutputFormat, ProblemCatalog, RetryPolicy};
use debate_infrastructure::{
    ConfigLoader, FileConfig, InMemoryDebateMemory, JsonlDebateMemory, MemoryBackend,
    OfflineGateway,
};
use debate_presentation::{Cli, ConsoleFormatter, MemoryChoice, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Everything the run needs once config and flags are merged
struct RunSettings {
    debate: DebateConfig,
    backend: MemoryBackend,
    memory_dir: std::path::PathBuf,
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    if cli.list_problems {
        print!("{}", ConsoleFormatter::format_problem_list(ProblemCatalog::all()));
        return Ok(ExitCode::SUCCESS);
    }

    let input = match (&cli.problem, &cli.problem_id) {
        (Some(text), _) => RunDebateInput::from_text(text.clone()),
        (None, Some(key)) => RunDebateInput::from_key(key.clone()),
        (None, None) => {
            bail!("A problem is required. Pass it as text or use --problem-id (see --list-problems).")
        }
    };

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for issue in file_config.validate() {
        warn!("Config: {}", issue);
    }
    if !file_config.output.color {
        colored::control::set_override(false);
    }
    let settings = resolve_settings(&cli, &file_config);

    // Ctrl-C stops the debate at the next turn boundary
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping debate");
                token.cancel();
            }
        });
    }

    // === Dependency Injection ===
    let report = if cli.offline {
        info!("Using offline gateway");
        with_memory(
            Arc::new(OfflineGateway::new()),
            &cli,
            settings,
            input,
            cancellation,
        )
        .await
    } else {
        run_with_provider(&cli, &file_config, settings, input, cancellation).await?
    };

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(feature = "bedrock")]
async fn run_with_provider(
    cli: &Cli,
    file_config: &FileConfig,
    settings: RunSettings,
    input: RunDebateInput,
    cancellation: CancellationToken,
) -> Result<DebateReport> {
    let provider = file_config.providers.bedrock.to_provider_config();
    let gateway = debate_infrastructure::BedrockGateway::new(&provider)
        .await
        .context("Failed to initialize Bedrock")?;
    Ok(with_memory(Arc::new(gateway), cli, settings, input, cancellation).await)
}

#[cfg(not(feature = "bedrock"))]
async fn run_with_provider(
    _cli: &Cli,
    _file_config: &FileConfig,
    _settings: RunSettings,
    _input: RunDebateInput,
    _cancellation: CancellationToken,
) -> Result<DebateReport> {
    bail!("No model provider compiled in. Rebuild with `--features bedrock` or pass --offline.")
}

async fn with_memory<G: LlmGateway + 'static>(
    gateway: Arc<G>,
    cli: &Cli,
    settings: RunSettings,
    input: RunDebateInput,
    cancellation: CancellationToken,
) -> DebateReport {
    match settings.backend {
        MemoryBackend::InMemory => {
            let memory = Arc::new(InMemoryDebateMemory::new());
            run_debate(gateway, memory, cli, settings, input, cancellation).await
        }
        MemoryBackend::Jsonl => {
            info!("Writing sessions to {}", settings.memory_dir.display());
            let memory = Arc::new(JsonlDebateMemory::new(settings.memory_dir.clone()));
            run_debate(gateway, memory, cli, settings, input, cancellation).await
        }
    }
}

async fn run_debate<G: LlmGateway + 'static, M: DebateMemory + 'static>(
    gateway: Arc<G>,
    memory: Arc<M>,
    cli: &Cli,
    settings: RunSettings,
    input: RunDebateInput,
    cancellation: CancellationToken,
) -> DebateReport {
    let use_case =
        RunDebateUseCase::new(gateway, memory, settings.debate).with_cancellation(cancellation);

    // Progress would interleave with JSON on stdout
    let show_progress = !cli.quiet && settings.format != OutputFormat::Json;
    let report = if !show_progress {
        use_case.execute(input).await
    } else if std::io::stderr().is_terminal() {
        use_case
            .execute_with_progress(input, &ProgressReporter::new())
            .await
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await
    };

    let output = match settings.format {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    report
}

/// Merge file config with CLI flags (flags win)
fn resolve_settings(cli: &Cli, file_config: &FileConfig) -> RunSettings {
    let mut debate = file_config.debate_config();

    if let Some(model) = &cli.model {
        let Ok(model) = model.parse::<Model>();
        debate = debate.with_panel(PanelModels::uniform(model));
    }
    if let Some(model) = &cli.synthesis_model {
        let Ok(model) = model.parse::<Model>();
        debate = debate.with_synthesis_model(model);
    }
    if let Some(seconds) = cli.pacing {
        debate = debate.with_pacing(Duration::from_secs(seconds));
    } else if cli.offline {
        debate = debate.with_pacing(Duration::ZERO);
    }
    if let Some(attempts) = cli.max_attempts {
        let current = debate.retry;
        let policy = RetryPolicy::new(attempts, current.base_delay(), current.max_delay())
            .unwrap_or(current);
        debate = debate.with_retry(policy);
    }

    let backend = match cli.memory {
        Some(MemoryChoice::Memory) => MemoryBackend::InMemory,
        Some(MemoryChoice::Jsonl) => MemoryBackend::Jsonl,
        None => file_config.memory.parse_backend().unwrap_or_default(),
    };
    let memory_dir = cli
        .memory_dir
        .clone()
        .unwrap_or_else(|| file_config.memory.session_dir());

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();

    RunSettings {
        debate,
        backend,
        memory_dir,
        format,
    }
}

/// Initialize logging based on verbosity level, optionally mirrored to
/// daily log files.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "disagree-commit.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            Ok(None)
        }
    }
}
