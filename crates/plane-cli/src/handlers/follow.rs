//! Follow command handler.
//!
//! Reads a tagged feed (`"{process_id}_{world_index} {text}"` per line) into
//! an event bus and shows one stream of it in a panel. When the feed comes
//! from a file, stdin becomes the console: plain lines are sent as commands
//! and `:`-prefixed lines drive the panel.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use plane_core::{CannedCommand, LogRendererPort, StreamKey, ViewMode};
use plane_runtime::{CommandBar, KeyedEventBus, ModeController, PendingLoad, spawn_tagged_reader};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TextRenderer;

/// A console line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Free text for the worker's command interpreter.
    Send(String),
    /// A canned button.
    Press(CannedCommand),
    Mode(ViewMode),
    Toggle,
    Refresh,
    Select(StreamKey),
    /// Same process, another world.
    World(i64),
    Quit,
}

/// Parse one console line.
///
/// Lines starting with `:` are directives; `::` escapes a literal colon.
/// Everything else is sent verbatim, surrounding whitespace included.
pub fn parse_directive(line: &str) -> Result<Directive, CliError> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Directive::Send(line.to_string()));
    };
    if rest.starts_with(':') {
        return Ok(Directive::Send(rest.to_string()));
    }

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let directive = match (name, arg) {
        ("live", None) => Directive::Mode(ViewMode::Live),
        ("history", None) => Directive::Mode(ViewMode::History),
        ("toggle", None) => Directive::Toggle,
        ("refresh", None) => Directive::Refresh,
        ("quit" | "q", None) => Directive::Quit,
        ("select", Some(key)) => Directive::Select(
            key.parse()
                .map_err(|e| CliError::Arguments(format!("{key}: {e}")))?,
        ),
        ("world", Some(world)) => Directive::World(
            world
                .parse()
                .map_err(|_| CliError::Arguments(format!("not a world index: {world}")))?,
        ),
        ("rollback", Some(saves)) => Directive::Press(CannedCommand::Rollback {
            saves: saves
                .parse()
                .map_err(|_| CliError::Arguments(format!("not a save count: {saves}")))?,
        }),
        (label, None) => CannedCommand::from_label(label)
            .map(Directive::Press)
            .ok_or_else(|| CliError::Arguments(format!("unknown directive :{label}")))?,
        (label, Some(_)) => {
            return Err(CliError::Arguments(format!(
                "unexpected argument to :{label}"
            )));
        }
    };
    Ok(directive)
}

/// Execute the follow command.
///
/// Runs until the feed ends (stdin feed), stdin closes (file feed), `:quit`
/// or Ctrl-C.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the feed file cannot be opened or stdin
/// cannot be read.
pub async fn execute(ctx: &CliContext, key: StreamKey, input: Option<&Path>) -> Result<()> {
    let bus = Arc::new(KeyedEventBus::new());
    let renderer: Arc<dyn LogRendererPort> = Arc::new(TextRenderer::stdout());
    let mut panel = ctx.panel(Arc::clone(&bus), renderer, ViewMode::Live);
    if let Some(pending) = panel.select(key) {
        spawn_load(pending);
    }

    let result = match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(CliError::from)
                .with_context(|| format!("cannot open feed {}", path.display()))?;
            let reader = spawn_tagged_reader(file, Arc::clone(&bus));
            run_console(ctx.command_bar(), &mut panel, reader).await
        }
        None => {
            let reader = spawn_tagged_reader(tokio::io::stdin(), Arc::clone(&bus));
            watch(reader).await;
            Ok(())
        }
    };

    panel.close();
    bus.shutdown();
    result
}

async fn watch(reader: JoinHandle<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => debug!("Interrupted"),
        _ = reader => debug!("Feed ended"),
    }
}

async fn run_console(
    mut bar: CommandBar,
    panel: &mut ModeController,
    mut reader: JoinHandle<()>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut feed_open = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = &mut reader, if feed_open => {
                feed_open = false;
                info!("Feed ended; console stays open");
            }
            line = lines.next_line() => {
                let Some(line) = line.map_err(CliError::from)? else {
                    break;
                };
                match parse_directive(&line) {
                    Ok(Directive::Quit) => break,
                    Ok(directive) => apply(&mut bar, panel, directive),
                    Err(err) => eprintln!("{err}"),
                }
            }
        }
    }

    if feed_open {
        reader.abort();
    }
    Ok(())
}

fn apply(bar: &mut CommandBar, panel: &mut ModeController, directive: Directive) {
    let Some(key) = panel.key() else {
        return;
    };
    let pending = match directive {
        Directive::Send(text) => {
            // Failures surface through the notifier
            drop(bar.submit_line(key, &text));
            None
        }
        Directive::Press(command) => {
            drop(bar.press(key, command));
            None
        }
        Directive::Mode(mode) => panel.set_mode(mode),
        Directive::Toggle => panel.toggle(),
        Directive::Refresh => panel.refresh(),
        Directive::Select(next) => panel.select(next),
        Directive::World(world) => panel.select(StreamKey::new(key.process_id, world)),
        Directive::Quit => None,
    };
    if let Some(pending) = pending {
        spawn_load(pending);
    }
}

/// Resolve a history query in the background. A newer query supersedes it.
fn spawn_load(pending: PendingLoad) {
    tokio::spawn(async move {
        let key = pending.key();
        let outcome = pending.resolve().await;
        debug!(%key, ?outcome, "History query resolved");
    });
}
