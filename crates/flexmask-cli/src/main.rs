//! flexmask CLI: bind meshes to face landmarks and inspect the result.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

mod commands;

#[derive(Parser)]
#[command(name = "flexmask")]
#[command(version, about = "flexmask: landmark-driven mesh deformation")]
struct Cli {
    /// Log every preprocessing stage.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs needed to build a mask.
#[derive(Args)]
pub struct MaskArgs {
    /// Mesh (TriangleMesh JSON) or scene (Scene JSON).
    pub input: String,

    /// Keypoint dictionary JSON: tracker label → vertex index or [x, y, z].
    #[arg(short, long, conflicts_with = "metadata", required_unless_present = "metadata")]
    pub keypoints: Option<String>,

    /// AR tracking metadata JSON.
    #[arg(short, long)]
    pub metadata: Option<String>,

    /// Mask config (TOML).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Comma-separated tracker labels. Defaults to the standard label table.
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind a mesh and write the binding snapshot.
    Bind {
        #[command(flatten)]
        mask: MaskArgs,

        /// Output JSON file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Explain the binding of one vertex.
    Inspect {
        #[command(flatten)]
        mask: MaskArgs,

        /// Vertex index.
        #[arg(long)]
        vertex: u32,
    },

    /// Validate a mask config, AR tracking metadata, or mesh.
    Validate {
        /// Path to a .toml config or a .json metadata/mesh file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Bind { mask, output } => commands::bind(&mask, output.as_deref(), cli.verbose),
        Commands::Inspect { mask, vertex } => commands::inspect(&mask, vertex, cli.verbose),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
