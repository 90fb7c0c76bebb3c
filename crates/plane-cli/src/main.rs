//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers.

use clap::{CommandFactory, Parser};

use plane_cli::bootstrap::init_tracing;
use plane_cli::error::exit_code_for;
use plane_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Dispatch to appropriate handler
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(CliConfig::from_cli(&cli))?;

    match command {
        Commands::Tail { stream } => {
            handlers::tail::execute(&ctx, stream.key()).await?;
        }
        Commands::Dispatch {
            stream,
            canned,
            saves,
            text,
        } => {
            let command = match (canned, text) {
                (Some(canned), _) => canned.to_command(*saves).text(),
                (None, Some(text)) => text.clone(),
                (None, None) => String::new(),
            };
            handlers::send::execute(&ctx, stream.key(), command).await?;
        }
        Commands::Follow { stream, input } => {
            handlers::follow::execute(&ctx, stream.key(), input.as_deref()).await?;
        }
    }

    Ok(())
}
