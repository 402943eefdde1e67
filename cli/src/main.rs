//! CLI entrypoint for chatline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result};
use chatline_application::{NoProgress, Notifier, SendMessageUseCase, StreamProgress};
use chatline_domain::RenderFormat;
use chatline_infrastructure::{
    AnyMarkdownRenderer, ConfigLoader, FileConfig, HttpChatBackend, TerminalMarkdownRenderer,
};
use chatline_presentation::{Cli, ConsoleNotifier, ConsoleView, SpinnerProgress, TuiApp};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;

    if cli.show_config {
        println!("{}", toml::to_string_pretty(&config)?);
        if !cli.no_config {
            ConfigLoader::print_config_sources(cli.config.as_ref());
        }
        return Ok(ExitCode::SUCCESS);
    }

    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let backend_config = config.backend.to_backend_config();

    if cli.is_one_shot() {
        logging::init_stderr(cli.verbose);
        info!("Starting chatline (one-shot)");
        let backend = Arc::new(HttpChatBackend::new(&backend_config)?);
        let question = cli.question.as_deref().unwrap_or_default();
        ask_once(backend, &config, question, cli.quiet).await
    } else {
        let log_dir = config
            .logging
            .log_dir()
            .context("Could not determine a log directory; set [logging] directory")?;
        let _guard = logging::init_file(cli.verbose, &log_dir)
            .with_context(|| format!("Failed to open log directory {}", log_dir.display()))?;
        info!("Starting chatline (interactive)");

        let backend = Arc::new(HttpChatBackend::new(&backend_config)?);
        let renderer = Arc::new(TerminalMarkdownRenderer::plain());
        let endpoint = backend.endpoint().to_string();
        let mut app = TuiApp::new(backend, renderer, endpoint);
        app.run().await?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Load config files (unless disabled) and apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(endpoint) = &cli.endpoint {
        config.backend.endpoint = endpoint.clone();
    }
    if let Some(secs) = cli.timeout {
        config.backend.request_timeout_secs = Some(secs);
    }
    if let Some(format) = cli.format {
        config.output.format = RenderFormat::from(format);
    }

    Ok(config)
}

/// One-shot mode: stream a single answer, print its final render
async fn ask_once(
    backend: Arc<HttpChatBackend>,
    config: &FileConfig,
    question: &str,
    quiet: bool,
) -> Result<ExitCode> {
    let format = config.output.effective_format();
    let renderer = Arc::new(AnyMarkdownRenderer::for_format(format));
    let endpoint = backend.endpoint().to_string();
    let use_case = SendMessageUseCase::new(backend, renderer);
    let view = ConsoleView::new();

    // Empty input is a no-op, not an error
    let Some(pending) = use_case.begin(question, &view) else {
        debug!("Empty question, nothing to send");
        return Ok(ExitCode::SUCCESS);
    };
    let bot_bubble = pending.bot_bubble();

    // Ctrl+C cancels the request instead of killing the process mid-line
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let progress: Box<dyn StreamProgress> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(SpinnerProgress::new(endpoint))
    };

    let result = use_case
        .stream_with_progress(pending, &view, &cancel, progress.as_ref())
        .await;

    // Partial answers stay visible on failure
    view.print_bubble(bot_bubble);

    match result {
        Ok(turn) => {
            info!(bytes = turn.response().len(), format = %format, "Answer printed");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if error.should_notify() {
                ConsoleNotifier.notify(&error.to_string());
            } else {
                warn!("Request cancelled");
                eprintln!("Cancelled");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
