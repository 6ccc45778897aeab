use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::markers::{RegionId, Rgba};

/// Buffer path that selects stdin/stdout instead of a file
pub const STDIO_BUFFER: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "ba-tiles")]
#[command(about = "Share Barbarian Assault tile markers as text")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Marker store file (overrides the configured one)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Text buffer used as the clipboard; `-` reads stdin and writes stdout
    #[arg(long, short = 'b', global = true)]
    pub buffer: Option<PathBuf>,

    /// Active region id; repeat or comma-separate for several
    #[arg(long = "region", short = 'r', global = true, value_delimiter = ',')]
    pub regions: Vec<RegionId>,

    /// Do not ask before importing or clearing
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy every marker in the active regions to the buffer
    Export,
    /// Merge markers from the buffer into the store
    Import {
        /// Show what would be imported without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove every marker in the active regions
    Clear {
        /// Show how many markers would be cleared without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the markers in the active regions
    List {
        /// List every region in the store instead of the active ones
        #[arg(long)]
        all: bool,
    },
    /// Mark the tile at world coordinates X Y
    Mark {
        x: i32,
        y: i32,
        /// Plane of the tile
        #[arg(long, short = 'p', default_value_t = 0)]
        plane: i32,
        /// Display color, `#RRGGBB` or `#AARRGGBB`
        #[arg(long, short = 'c')]
        color: Option<Rgba>,
        /// Text shown on the tile
        #[arg(long, short = 'l')]
        label: Option<String>,
        /// Wave this tile applies to; repeat for several
        #[arg(long = "wave", value_delimiter = ',')]
        waves: Vec<i32>,
        /// Role this tile applies to; repeat for several
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// Show the default active regions, or replace them with REGIONS
    Regions { regions: Vec<RegionId> },
}
