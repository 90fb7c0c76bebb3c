//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Console API client (via plane-http)
//! - Views, bus and dispatcher (via plane-runtime)
//! - Tracing subscriber
//!
//! Command handlers receive the fully-composed `CliContext`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use plane_core::{
    ConsoleEventEmitter, ConsoleSettings, LogRendererPort, NoopEmitter, ViewMode,
    validate_settings,
};
use plane_http::{ConsoleApiConfig, DefaultConsoleClient};
use plane_runtime::{
    CommandBar, CommandDispatcher, HistoryLogView, KeyedEventBus, LiveLogView, ModeController,
};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::StderrNotifier;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Console API connection.
    pub api: ConsoleApiConfig,
    /// Buffering and history window.
    pub settings: ConsoleSettings,
}

impl CliConfig {
    /// Build config from parsed global arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api: ConsoleApiConfig::new()
                .with_base_url(cli.api_url.clone())
                .with_timeout(Duration::from_secs(cli.timeout_secs))
                .with_optional_token(cli.token.clone()),
            settings: ConsoleSettings {
                buffer_capacity: cli.buffer_lines,
                history_count: cli.history_lines,
                history_tail: cli.history_lines,
            },
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Console API client; serves as both history source and command sink.
    pub client: Arc<DefaultConsoleClient>,
    /// Validated console settings.
    pub settings: ConsoleSettings,
    /// Where user-facing notifications go.
    pub emitter: Arc<dyn ConsoleEventEmitter>,
}

impl CliContext {
    /// The same wiring without user notifications.
    ///
    /// One-shot commands report their single outcome through the exit path.
    pub fn one_shot(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            settings: self.settings.clone(),
            emitter: Arc::new(NoopEmitter),
        }
    }

    /// A history view backed by the console API.
    pub fn history_view(&self, renderer: Arc<dyn LogRendererPort>) -> HistoryLogView {
        HistoryLogView::new(
            self.client.clone(),
            renderer,
            Arc::clone(&self.emitter),
            self.settings.history_count,
            self.settings.history_tail,
        )
    }

    /// A live view on `bus`.
    pub fn live_view(
        &self,
        bus: Arc<KeyedEventBus>,
        renderer: Arc<dyn LogRendererPort>,
    ) -> LiveLogView {
        LiveLogView::new(bus, renderer, self.settings.buffer_capacity)
    }

    /// A mode controller with both views sharing `renderer`.
    pub fn panel(
        &self,
        bus: Arc<KeyedEventBus>,
        renderer: Arc<dyn LogRendererPort>,
        mode: ViewMode,
    ) -> ModeController {
        ModeController::new(
            self.live_view(bus, Arc::clone(&renderer)),
            self.history_view(renderer),
            mode,
        )
    }

    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(self.client.clone(), Arc::clone(&self.emitter))
    }

    pub fn command_bar(&self) -> CommandBar {
        CommandBar::new(self.dispatcher())
    }
}

/// Bootstrap the CLI application.
///
/// Validates settings and builds the console API client.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    validate_settings(&config.settings)
        .map_err(|e| CliError::Config(e.to_string()))
        .context("invalid console settings")?;

    let client = DefaultConsoleClient::new(&config.api)
        .map_err(CliError::from)
        .with_context(|| format!("cannot use console API at {}", config.api.base_url()))?;

    Ok(CliContext {
        client: Arc::new(client),
        settings: config.settings,
        emitter: Arc::new(StderrNotifier),
    })
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only log lines. `RUST_LOG` wins over
/// `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
