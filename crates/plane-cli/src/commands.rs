//! Subcommands.

use clap::{Args, Subcommand, ValueEnum};
use plane_core::{CannedCommand, StreamKey};

/// Which stream to act on.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamArgs {
    /// Process id
    #[arg(long, allow_negative_numbers = true)]
    pub id: i64,

    /// World (selection index) within the process
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub world: i64,
}

impl StreamArgs {
    pub const fn key(&self) -> StreamKey {
        StreamKey::new(self.id, self.world)
    }
}

/// Console buttons available from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedArg {
    /// Roll the world back
    Rollback,
    /// Regenerate the world shard
    Regenerate,
    /// Force a save
    Save,
    /// List online players
    Players,
}

impl CannedArg {
    /// Resolve to the command; `saves` only applies to rollback.
    pub const fn to_command(self, saves: u32) -> CannedCommand {
        match self {
            Self::Rollback => CannedCommand::Rollback { saves },
            Self::Regenerate => CannedCommand::RegenerateShard,
            Self::Save => CannedCommand::Save,
            Self::Players => CannedCommand::ListPlayers,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the recent history of a stream
    Tail {
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Send one console command to a process
    #[command(name = "send")]
    Dispatch {
        #[command(flatten)]
        stream: StreamArgs,

        /// Send a canned button command instead of free text
        #[arg(long, value_enum, conflicts_with = "text")]
        canned: Option<CannedArg>,

        /// Snapshots to roll back with `--canned rollback`
        #[arg(long, default_value_t = CannedCommand::DEFAULT_ROLLBACK_SAVES)]
        saves: u32,

        /// Command text, sent verbatim
        #[arg(required_unless_present = "canned")]
        text: Option<String>,
    },

    /// Follow a stream live from a tagged feed ("<id>_<world> <line>")
    Follow {
        #[command(flatten)]
        stream: StreamArgs,

        /// Feed to read; stdin when omitted. With a file, stdin takes commands.
        #[arg(long)]
        input: Option<std::path::PathBuf>,
    },
}
